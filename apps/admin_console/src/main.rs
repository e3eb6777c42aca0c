use std::{io, path::PathBuf, sync::Arc, thread};

mod app;
mod backend_bridge;
mod config;
mod controller;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpPromotionsApi, PromotionAdapter};
use crossbeam_channel::{bounded, Sender};
use tracing_subscriber::EnvFilter;

use crate::{
    app::ConsoleApp, backend_bridge::commands::BackendCommand, config::load_settings,
    controller::events::UiEvent,
};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Base URL of the promotions service.
    #[arg(long)]
    api_url: Option<String>,
    /// Drop responses superseded by a newer press of the same button.
    #[arg(long)]
    ignore_stale_responses: bool,
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(log_filter) = args.log_filter {
        settings.log_filter = log_filter;
    }
    settings.ignore_stale_responses |= args.ignore_stale_responses;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();

    let api = HttpPromotionsApi::new(&settings.api_base_url)
        .with_context(|| format!("invalid promotions service url '{}'", settings.api_base_url))?;
    let adapter = Arc::new(
        PromotionAdapter::new(Arc::new(api))
            .with_stale_response_guard(settings.ignore_stale_responses),
    );
    tracing::info!(
        api_base_url = %settings.api_base_url,
        ignore_stale_responses = settings.ignore_stale_responses,
        "starting promotions admin console"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let worker = backend_bridge::runtime::launch(Arc::clone(&adapter), cmd_rx, ui_tx.clone());
    spawn_input_thread(ui_tx);

    let mut console = ConsoleApp::new(adapter, cmd_tx);
    console.run(&ui_rx, &mut io::stdout().lock())?;
    drop(console);

    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    Ok(())
}

fn spawn_input_thread(ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lines() {
            match line {
                Ok(line) => {
                    if ui_tx.send(UiEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    tracing::warn!("failed to read console input: {err}");
                    break;
                }
            }
        }
        let _ = ui_tx.send(UiEvent::InputClosed);
    });
}
