//! Help text and command names for logging.

use crate::cli::parse::Commands;
use crate::command::Command;
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

/// Stable command name for log fields
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init => "init",
        Commands::Status { .. } => "status",
        Commands::Check { .. } => "check",
        Commands::Flush => "flush",
        Commands::Config => "config",
        Commands::Shell => "shell",
        Commands::Add => "add",
        Commands::Diff => "diff",
        Commands::Tag => "tag",
        Commands::Commit => "commit",
        Commands::Log => "log",
    }
}

/// Shell help: one line per command with its shortcut
pub fn format_help(color: bool) -> String {
    let mut out = String::new();
    let title = "valid commands:";
    if color {
        let _ = writeln!(out, "{}", title.style(Style::new().bold()));
    } else {
        let _ = writeln!(out, "{}", title);
    }
    for command in Command::ALL {
        let mut line = format!(
            "  {:<3} {:<8} {}",
            command.shortcut(),
            command.name(),
            command.description()
        );
        if !command.is_implemented() {
            line.push_str(" (not implemented)");
        }
        if color {
            let _ = writeln!(out, "{}", line.dimmed());
        } else {
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}
