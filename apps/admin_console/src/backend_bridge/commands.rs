//! Backend commands queued from the console to the backend worker.

use client_core::PendingAction;

pub enum BackendCommand {
    /// Send the prepared request; the answer comes back as a UI event.
    Dispatch(PendingAction),
    Shutdown,
}
