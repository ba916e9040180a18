//! Command definitions
//!
//! Represents commands sent to a session.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SeqLogError;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Init,
    Step,
    GetData,
    Reset,
}

impl CommandType {
    /// Keyword used in the text form
    pub fn name(&self) -> &'static str {
        match self {
            CommandType::Init => "init",
            CommandType::Step => "step",
            CommandType::GetData => "getData",
            CommandType::Reset => "reset",
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Bind the session to a log file and initialize it
    Init { path: PathBuf },

    /// Append the next sequence value
    Step,

    /// Read the full sequence
    GetData,

    /// Clear the log
    Reset,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Init { .. } => CommandType::Init,
            Command::Step => CommandType::Step,
            Command::GetData => CommandType::GetData,
            Command::Reset => CommandType::Reset,
        }
    }
}

impl FromStr for Command {
    type Err = SeqLogError;

    /// Parse the text form: `init <path>`, `step`, `getData` (or `get`), `reset`
    ///
    /// Keywords are case-insensitive; the path is taken verbatim after the
    /// first run of whitespace.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "init" => {
                if rest.is_empty() {
                    return Err(SeqLogError::Protocol("init: missing path".to_string()));
                }
                return Ok(Command::Init {
                    path: PathBuf::from(rest),
                });
            }
            "step" => Command::Step,
            "getdata" | "get" => Command::GetData,
            "reset" => Command::Reset,
            "" => return Err(SeqLogError::Protocol("empty command".to_string())),
            other => {
                return Err(SeqLogError::Protocol(format!("unknown command: {}", other)));
            }
        };

        if !rest.is_empty() {
            return Err(SeqLogError::Protocol(format!(
                "{}: unexpected argument '{}'",
                command.command_type().name(),
                rest
            )));
        }

        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Init { path } => write!(f, "init {}", path.display()),
            other => f.write_str(other.command_type().name()),
        }
    }
}
