//! Controller layer: UI events, console commands, and command orchestration.

pub mod console;
pub mod events;
pub mod orchestration;
