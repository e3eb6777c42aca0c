//! Bridge between the console event loop and the backend worker.

pub mod commands;
pub mod runtime;
