//! Backend worker: owns the tokio runtime and runs each request on its own task.

use std::{sync::Arc, thread};

use client_core::PromotionAdapter;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

pub fn launch(
    adapter: Arc<PromotionAdapter>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Dispatch(pending) => {
                        let adapter = Arc::clone(&adapter);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let response = adapter.dispatch(pending.request()).await;
                            let action = pending.kind();
                            match ui_tx.try_send(UiEvent::ActionCompleted { pending, response }) {
                                Ok(()) => {}
                                Err(TrySendError::Full(_)) => {
                                    tracing::warn!(%action, "ui event queue full; response dropped");
                                }
                                Err(TrySendError::Disconnected(_)) => {
                                    tracing::debug!(%action, "console gone; response dropped");
                                }
                            }
                        });
                    }
                    BackendCommand::Shutdown => break,
                }
            }
        });
    })
}
