//! The console event loop. It owns the page state and handles one event at a
//! time; responses are applied in the order they arrive.

use std::{io::Write, sync::Arc};

use client_core::{ActionOutcome, FormState, PendingAction, PromotionAdapter, PromotionUi};
use crossbeam_channel::{Receiver, Sender};
use tracing::{info, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        console::{
            parse_command, render_categories, render_fields, render_page, ConsoleCommand, HELP,
        },
        events::UiEvent,
        orchestration::dispatch_backend_command,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ConsoleApp {
    adapter: Arc<PromotionAdapter>,
    cmd_tx: Sender<BackendCommand>,
    form: FormState,
    status: String,
}

impl ConsoleApp {
    pub fn new(adapter: Arc<PromotionAdapter>, cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            adapter,
            cmd_tx,
            form: FormState::new(),
            status: String::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn run(&mut self, ui_rx: &Receiver<UiEvent>, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "promotions admin console; type 'help'")?;
        while let Ok(event) = ui_rx.recv() {
            if self.handle_event(event, out)? == LoopControl::Exit {
                break;
            }
        }
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Shutdown, &mut self.status);
        Ok(())
    }

    pub fn handle_event(
        &mut self,
        event: UiEvent,
        out: &mut impl Write,
    ) -> std::io::Result<LoopControl> {
        match event {
            UiEvent::Input(line) => return self.handle_input(&line, out),
            UiEvent::InputClosed => return Ok(LoopControl::Exit),
            UiEvent::ActionCompleted { pending, response } => {
                let action = pending.kind();
                match self.adapter.complete(&pending, response, &mut self.form) {
                    Ok(ActionOutcome::Ignored) => {
                        writeln!(out, "({action}: stale response ignored)")?;
                    }
                    Ok(_) => write!(out, "{}", render_page(&self.form))?,
                    Err(err) => {
                        warn!(%action, error = %err, "malformed error response");
                        writeln!(out, "error: {err}")?;
                    }
                }
            }
            UiEvent::Info(message) => info!("{message}"),
            UiEvent::BackendFailed(message) => {
                writeln!(out, "error: {message}")?;
                return Ok(LoopControl::Exit);
            }
        }
        Ok(LoopControl::Continue)
    }

    fn handle_input(&mut self, line: &str, out: &mut impl Write) -> std::io::Result<LoopControl> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(LoopControl::Continue),
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(LoopControl::Continue);
            }
        };

        match command {
            ConsoleCommand::Set { field, value } => self.form.set_field(field, value),
            ConsoleCommand::Press(kind) => match self.adapter.begin(kind, &mut self.form) {
                Some(pending) => self.queue(pending, out)?,
                None => write!(out, "{}", render_page(&self.form))?,
            },
            ConsoleCommand::Search { filters } => {
                let pending = self.adapter.begin_search(&self.form, &filters);
                self.queue(pending, out)?;
            }
            ConsoleCommand::Show => write!(out, "{}", render_page(&self.form))?,
            ConsoleCommand::Fields => writeln!(out, "{}", render_fields())?,
            ConsoleCommand::Categories => writeln!(out, "{}", render_categories())?,
            ConsoleCommand::Help => writeln!(out, "{HELP}")?,
            ConsoleCommand::Quit => return Ok(LoopControl::Exit),
        }
        Ok(LoopControl::Continue)
    }

    fn queue(&mut self, pending: PendingAction, out: &mut impl Write) -> std::io::Result<()> {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Dispatch(pending),
            &mut self.status,
        );
        if !self.status.is_empty() {
            writeln!(out, "error: {}", std::mem::take(&mut self.status))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
