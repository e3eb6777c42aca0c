//! Events delivered to the console event loop.

use client_core::{ApiResponse, PendingAction};

pub enum UiEvent {
    /// A line typed by the operator.
    Input(String),
    /// Standard input reached end of file.
    InputClosed,
    ActionCompleted {
        pending: PendingAction,
        response: ApiResponse,
    },
    Info(String),
    BackendFailed(String),
}
