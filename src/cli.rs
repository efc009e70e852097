//! CLI domain: parse, route, help, output and the interactive shell.
//! No snapshot logic lives here; the route table dispatches to `Repository`.

mod help;
mod interactive;
mod output;
mod parse;
mod route;

pub use help::{command_name, format_help};
pub use interactive::{run_shell, shell_step, ShellStep};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::RunContext;
