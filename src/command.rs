//! The closed set of repository commands
//!
//! Shared by the one-shot CLI and the interactive shell. Commands without an
//! implementation are still listed here so that dispatching one produces a
//! distinct `NotImplemented` error.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Init,
    Check,
    Add,
    Status,
    Diff,
    Tag,
    Commit,
    Log,
    Flush,
    Help,
    Quit,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::Init,
        Command::Check,
        Command::Add,
        Command::Status,
        Command::Diff,
        Command::Tag,
        Command::Commit,
        Command::Log,
        Command::Flush,
        Command::Help,
        Command::Quit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::Check => "check",
            Command::Add => "add",
            Command::Status => "status",
            Command::Diff => "diff",
            Command::Tag => "tag",
            Command::Commit => "commit",
            Command::Log => "log",
            Command::Flush => "flush",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    /// Single-letter shell shortcut
    pub fn shortcut(&self) -> &'static str {
        match self {
            Command::Init => "i",
            Command::Check => "e",
            Command::Add => "a",
            Command::Status => "s",
            Command::Diff => "d",
            Command::Tag => "t",
            Command::Commit => "c",
            Command::Log => "l",
            Command::Flush => "f",
            Command::Help => "h",
            Command::Quit => "q",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Init => "Snapshot the workspace and set head",
            Command::Check => "Show the workspace tree with changes marked",
            Command::Add => "Add file to next commit",
            Command::Status => "Show head and its snapshot",
            Command::Diff => "Identify changes",
            Command::Tag => "Tag this commit with version",
            Command::Commit => "Record a commit",
            Command::Log => "Show history log",
            Command::Flush => "Delete all repository metadata",
            Command::Help => "Display this message",
            Command::Quit => "Leave the interactive shell",
        }
    }

    pub fn is_implemented(&self) -> bool {
        !matches!(
            self,
            Command::Add | Command::Diff | Command::Tag | Command::Commit | Command::Log
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised command word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command invalid: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.name() == word || c.shortcut() == word)
            .ok_or_else(|| UnknownCommand(word.to_string()))
    }
}
