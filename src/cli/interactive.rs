//! Interactive shell: read a command word, run it, repeat until `quit`.

use crate::cli::help::format_help;
use crate::cli::output::map_error;
use crate::cli::route::RunContext;
use crate::command::Command;
use crate::error::ApiError;
use dialoguer::Input;
use tracing::{debug, warn};

/// Outcome of one shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellStep {
    /// Command output (may be empty)
    Continue(String),
    /// Message for a bad word or a failed command; the shell keeps going
    Failed(String),
    Quit,
}

/// Interpret one line of shell input
pub fn shell_step(ctx: &RunContext, input: &str) -> ShellStep {
    let word = input.trim();
    if word.is_empty() {
        return ShellStep::Continue(String::new());
    }

    let command = match word.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            debug!(input = word, "Unknown shell command");
            return ShellStep::Failed(format!("{}\n{}", e, format_help(ctx.color())));
        }
    };

    if command == Command::Quit {
        return ShellStep::Quit;
    }

    match ctx.dispatch(command) {
        Ok(output) => ShellStep::Continue(output),
        Err(e) => {
            warn!(command = %command, error = %e, "Shell command failed");
            ShellStep::Failed(map_error(&e))
        }
    }
}

/// Run the prompt loop on the terminal. Returns the farewell line.
pub fn run_shell(ctx: &RunContext) -> Result<String, ApiError> {
    println!("{}", format_help(ctx.color()));
    loop {
        let line = Input::<String>::new()
            .with_prompt("verse command")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ApiError::InputError(e.to_string()))?;

        match shell_step(ctx, &line) {
            ShellStep::Continue(output) => {
                if !output.is_empty() {
                    println!("{}", output.trim_end());
                }
            }
            ShellStep::Failed(message) => eprintln!("{}", message.trim_end()),
            ShellStep::Quit => return Ok("quitting...".to_string()),
        }
    }
}
