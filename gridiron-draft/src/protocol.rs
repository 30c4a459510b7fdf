// Messages between the input reader, the app loop, and the output printer.

use thiserror::Error;

use crate::fantasy::stats::PlayerId;

/// Commands typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Search(String),
    Compare(PlayerId),
    ClearComparison,
    Draft(PlayerId),
    Remove(PlayerId),
    ShowRoster,
    Help,
    Quit,
}

/// Output pushed from the app loop to the terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A one-line status message.
    Status(String),
    /// A multi-line block (cards, comparison, roster table).
    Screen(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandParseError {
    #[error("Unknown command: {0}. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid player ID: {0}")]
    InvalidPlayerId(String),
}

fn parse_player_id(arg: &str, usage: &'static str) -> Result<PlayerId, CommandParseError> {
    if arg.is_empty() {
        return Err(CommandParseError::MissingArgument(usage));
    }
    arg.parse::<PlayerId>()
        .map_err(|_| CommandParseError::InvalidPlayerId(arg.to_string()))
}

/// Parse one input line. Returns `Ok(None)` for a blank line.
///
/// The command word is case-insensitive. `search` keeps the rest of the line
/// as typed, so names with spaces work.
pub fn parse_command(line: &str) -> Result<Option<UserCommand>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_lowercase().as_str() {
        "search" | "s" => UserCommand::Search(rest.to_string()),
        "compare" | "c" => UserCommand::Compare(parse_player_id(rest, "compare <player id>")?),
        "clear" => UserCommand::ClearComparison,
        "draft" | "d" => UserCommand::Draft(parse_player_id(rest, "draft <player id>")?),
        "remove" | "rm" => UserCommand::Remove(parse_player_id(rest, "remove <player id>")?),
        "roster" | "r" => UserCommand::ShowRoster,
        "help" | "h" | "?" => UserCommand::Help,
        "quit" | "q" | "exit" => UserCommand::Quit,
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}
