//! Line-oriented text host for the todo widget.
//!
//! # Design
//! The host owns a `Session` and nothing else. Each input line is parsed into
//! a `Command`; list rows are resolved to `TodoId`s here, so the core only
//! ever sees id-addressed intents. Rendering reads a fresh `Snapshot` every
//! time.

use std::io::{BufRead, Write};

use anyhow::Context;
use thiserror::Error;
use todo_core::{Field, IdStrategy, Session, SessionConfig, Snapshot, TodoId};
use tracing::{debug, info};

/// Environment-derived settings for the console host.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    pub session: SessionConfig,
}

impl HostConfig {
    /// Read `TODO_ID_STRATEGY` and `TODO_PREFILL_ON_EDIT` from the process
    /// environment. Unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = HostConfig::default();

        if let Some(v) = lookup("TODO_ID_STRATEGY") {
            config.session.id_strategy = v
                .parse::<IdStrategy>()
                .context("invalid TODO_ID_STRATEGY")?;
        }
        if let Some(v) = lookup("TODO_PREFILL_ON_EDIT") {
            config.session.prefill_on_edit =
                parse_flag(&v).context("invalid TODO_PREFILL_ON_EDIT")?;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a boolean (1/0, true/false, yes/no, on/off), got {0:?}")]
pub struct BadFlag(pub String);

fn parse_flag(value: &str) -> Result<bool, BadFlag> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BadFlag(value.to_string())),
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Submit,
    Toggle(usize),
    Edit(usize),
    Delete(usize),
    Show,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0} <row>")]
    MissingRow(&'static str),

    #[error("not a row number: {0}")]
    BadRow(String),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        let row = |name: &'static str| -> Result<usize, CommandError> {
            let rest = rest.trim();
            if rest.is_empty() {
                return Err(CommandError::MissingRow(name));
            }
            match rest.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(CommandError::BadRow(rest.to_string())),
            }
        };

        match word {
            "title" => Ok(Command::Set(Field::Title, rest.to_string())),
            "description" => Ok(Command::Set(Field::Description, rest.to_string())),
            "submit" => Ok(Command::Submit),
            "toggle" => row("toggle").map(Command::Toggle),
            "edit" => row("edit").map(Command::Edit),
            "delete" => row("delete").map(Command::Delete),
            "show" => Ok(Command::Show),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Write the whole widget: form, errors, submit label, then the list.
pub fn render(snapshot: &Snapshot, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Todo List")?;
    for field in Field::ALL {
        let label = match field {
            Field::Title => "Title",
            Field::Description => "Description",
        };
        writeln!(out, "{label}: {}", snapshot.draft.get(field))?;
        if let Some(message) = snapshot.errors.get(&field) {
            writeln!(out, "  ! {message}")?;
        }
    }
    writeln!(out, "[{}]", snapshot.submit_label)?;
    writeln!(out)?;
    writeln!(out, "Todo Items")?;
    if let Some(message) = snapshot.empty_message {
        writeln!(out, "{message}")?;
    }
    for (row, item) in snapshot.items.iter().enumerate() {
        let mark = if item.completed { 'x' } else { ' ' };
        writeln!(
            out,
            "{}. [{mark}] {} - {}",
            row + 1,
            item.title,
            item.description
        )?;
    }
    Ok(())
}

fn row_id(session: &Session, row: usize) -> Option<TodoId> {
    session.items().get(row.checked_sub(1)?).map(|item| item.id)
}

/// Apply `f` to the item shown at 1-based `row`. Returns whether it ran.
fn at_row(
    session: &mut Session,
    row: usize,
    output: &mut impl Write,
    f: impl FnOnce(&mut Session, TodoId),
) -> std::io::Result<bool> {
    match row_id(session, row) {
        Some(id) => {
            f(session, id);
            Ok(true)
        }
        None => {
            writeln!(output, "no item at row {row}")?;
            Ok(false)
        }
    }
}

/// Process commands from `input` until EOF or `quit`, rendering to `output`.
pub fn run(input: impl BufRead, mut output: impl Write, config: HostConfig) -> anyhow::Result<()> {
    info!(
        id_strategy = ?config.session.id_strategy,
        prefill_on_edit = config.session.prefill_on_edit,
        "console host started"
    );
    let mut session = Session::new(config.session);
    render(&session.snapshot(), &mut output)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };
        debug!(?command, "command");

        let rerender = match command {
            Command::Quit => break,
            Command::Set(field, value) => {
                session.field_change(field, value);
                false
            }
            Command::Submit => {
                // Rejections show up as field errors in the render.
                let _ = session.submit();
                true
            }
            Command::Show => true,
            Command::Toggle(row) => at_row(&mut session, row, &mut output, |s, id| {
                s.toggle(id);
            })?,
            Command::Edit(row) => at_row(&mut session, row, &mut output, |s, id| s.begin_edit(id))?,
            Command::Delete(row) => at_row(&mut session, row, &mut output, |s, id| {
                s.delete(id);
            })?,
        };

        if rerender {
            writeln!(output)?;
            render(&session.snapshot(), &mut output)?;
        }
    }

    output.flush()?;
    Ok(())
}
