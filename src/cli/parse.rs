//! CLI parse: clap types for verse. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// verse - content-addressed snapshots of a working directory
#[derive(Parser)]
#[command(name = "verse")]
#[command(about = "Content-addressed snapshots of a working directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Snapshot the workspace and set head
    Init,
    /// Show head and its snapshot
    Status {
        /// Omit file contents
        #[arg(long)]
        no_content: bool,
    },
    /// Show the workspace tree with changes marked, or classify one path
    Check {
        /// Path to classify against head
        path: Option<PathBuf>,
    },
    /// Delete all repository metadata
    Flush,
    /// Print the effective configuration
    Config,
    /// Start the interactive command shell
    Shell,
    /// Add file to next commit (not implemented)
    Add,
    /// Identify changes (not implemented)
    Diff,
    /// Tag this commit with version (not implemented)
    Tag,
    /// Record a commit (not implemented)
    Commit,
    /// Show history log (not implemented)
    Log,
}
