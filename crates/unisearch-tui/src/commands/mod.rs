// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use std::time::Duration;
use unisearch_core::{SchemaError, SchemaName};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Toggle the help popup
    Help,
    // Change theme
    Theme(String),
    // Switch the selected schema
    Schema(SchemaName),
    // Empty the query
    Clear,
    // Set the loading delay in milliseconds
    Delay(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Blank input: close the bar without acting.
    #[error("")]
    Empty,
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("unknown command: {0}")]
    Unknown(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("theme <default|gruvbox>"))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "schema" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("schema <name>"))
                } else {
                    Ok(Command::Schema(rest.parse()?))
                }
            }
            "delay" => rest
                .parse::<u64>()
                .map(Command::Delay)
                .map_err(|_| CommandError::Usage("delay <milliseconds>")),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Schema(schema) => {
            s.picker.selected = schema;
        }
        Command::Clear => {
            s.query.clear();
        }
        Command::Delay(ms) => {
            s.worker.set_delay(Duration::from_millis(ms));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
