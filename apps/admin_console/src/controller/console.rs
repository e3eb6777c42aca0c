//! Console commands typed by the operator, and the text rendering of the page.

use std::fmt::Write as _;

use client_core::{
    ActionKind, ExtraFilter, FormState, PromotionField, PromotionUi, ResultTable,
};
use shared::domain::PromotionCategory;
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  set <field> <value>   fill a field (name or element id); no value empties it
  show                  print the form, results and flash message
  fields                list field names
  categories            list the categories the service accepts
  help                  this text
  quit                  leave the console
buttons:
  create update retrieve delete clear search best expire  (the -btn suffix is accepted)
  search available=<true|false> status=<text>   search with filters the form lacks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Set { field: PromotionField, value: String },
    Press(ActionKind),
    Search { filters: Vec<ExtraFilter> },
    Show,
    Fields,
    Categories,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleCommandError {
    #[error("unknown command '{0}'; type 'help'")]
    UnknownCommand(String),
    #[error("unknown field '{0}'; type 'fields'")]
    UnknownField(String),
    #[error("'set' needs a field name")]
    MissingField,
    #[error("bad search filter '{0}'; use available=<true|false> or status=<text>")]
    BadFilter(String),
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, ConsoleCommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let command = match word.to_ascii_lowercase().as_str() {
        "set" => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                return Err(ConsoleCommandError::MissingField);
            }
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = PromotionField::from_name(name)
                .ok_or_else(|| ConsoleCommandError::UnknownField(name.to_string()))?;
            ConsoleCommand::Set {
                field,
                value: unquote(value.trim()).to_string(),
            }
        }
        "show" => ConsoleCommand::Show,
        "fields" => ConsoleCommand::Fields,
        "categories" => ConsoleCommand::Categories,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => match ActionKind::from_button(other) {
            Some(ActionKind::Search) if !rest.trim().is_empty() => ConsoleCommand::Search {
                filters: rest
                    .split_whitespace()
                    .map(parse_filter)
                    .collect::<Result<_, _>>()?,
            },
            Some(kind) => ConsoleCommand::Press(kind),
            None => return Err(ConsoleCommandError::UnknownCommand(word.to_string())),
        },
    };
    Ok(Some(command))
}

fn parse_filter(raw: &str) -> Result<ExtraFilter, ConsoleCommandError> {
    let bad = || ConsoleCommandError::BadFilter(raw.to_string());
    let (key, value) = raw.split_once('=').ok_or_else(bad)?;
    match key.to_ascii_lowercase().as_str() {
        "available" => match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(ExtraFilter::Available(true)),
            "false" | "no" | "0" => Ok(ExtraFilter::Available(false)),
            _ => Err(bad()),
        },
        "status" => Ok(ExtraFilter::Status(unquote(value).to_string())),
        _ => Err(bad()),
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

pub fn render_form(form: &FormState) -> String {
    let width = PromotionField::ALL
        .iter()
        .map(|field| field.element_id().len())
        .max()
        .unwrap_or_default();
    let mut out = String::new();
    for field in PromotionField::ALL {
        let _ = writeln!(out, "  {:width$}  {}", field.element_id(), form.field(field));
    }
    out
}

pub fn render_results(table: &ResultTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(client_core::table::RESULT_HEADERS);
    for row in table.rows() {
        builder.push_record(row.cells());
    }
    let mut rendered = builder.build();
    rendered.with(Style::modern());
    rendered.to_string()
}

pub fn render_page(form: &FormState) -> String {
    let mut out = render_form(form);
    if let Some(table) = form.results() {
        out.push_str(&render_results(table));
        out.push('\n');
    }
    if let Some(message) = form.flash_message() {
        let _ = writeln!(out, "[{message}]");
    }
    out
}

pub fn render_fields() -> String {
    PromotionField::ALL
        .iter()
        .map(|field| format!("  {} ({})", field.name(), field.element_id()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_categories() -> String {
    PromotionCategory::ALL
        .iter()
        .map(|category| format!("  {category}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../tests/console_tests.rs"]
mod tests;
