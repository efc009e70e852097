//! CLI route: single route table and run context.

use crate::cli::help::format_help;
use crate::cli::interactive::run_shell;
use crate::cli::parse::Commands;
use crate::command::Command;
use crate::config::{ConfigLoader, VerseConfig};
use crate::error::ApiError;
use crate::render::{format_status, format_workspace_tree};
use crate::repository::Repository;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: the repository handle and its settings.
pub struct RunContext {
    repo: Repository,
    config: VerseConfig,
    config_path: Option<PathBuf>,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    ///
    /// The workspace must be an existing directory.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        if !workspace_root.is_dir() {
            return Err(ApiError::InvalidWorkspace(format!(
                "{} is not a directory",
                workspace_root.display()
            )));
        }

        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.validate()?;

        let repo = Repository::open(&workspace_root).with_walker_config(config.walk.walker_config());
        debug!(workspace = %workspace_root.display(), "Run context ready");

        Ok(Self {
            repo,
            config,
            config_path,
            color: true,
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn config(&self) -> &VerseConfig {
        &self.config
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Execute a parsed CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init => self.dispatch(Command::Init),
            Commands::Status { no_content } => self.handle_status(!no_content),
            Commands::Check { path: Some(path) } => self.handle_check_path(path),
            Commands::Check { path: None } => self.dispatch(Command::Check),
            Commands::Flush => self.dispatch(Command::Flush),
            Commands::Config => self.handle_config(),
            Commands::Shell => run_shell(self),
            Commands::Add => self.dispatch(Command::Add),
            Commands::Diff => self.dispatch(Command::Diff),
            Commands::Tag => self.dispatch(Command::Tag),
            Commands::Commit => self.dispatch(Command::Commit),
            Commands::Log => self.dispatch(Command::Log),
        }
    }

    /// Execute one command from the closed command set
    pub fn dispatch(&self, command: Command) -> Result<String, ApiError> {
        info!(command = %command, "Dispatching command");
        match command {
            Command::Init => self.handle_init(),
            Command::Check => self.handle_check_tree(),
            Command::Status => self.handle_status(true),
            Command::Flush => self.handle_flush(),
            Command::Help => Ok(format_help(self.color)),
            Command::Quit => Ok("quitting...".to_string()),
            Command::Add | Command::Diff | Command::Tag | Command::Commit | Command::Log => {
                Err(ApiError::NotImplemented(command))
            }
        }
    }

    fn handle_init(&self) -> Result<String, ApiError> {
        let report = self.repo.init()?;
        let mut output = format!(
            "Initialized {} in {}\nHead: {}\n",
            crate::repository::METADATA_DIR,
            self.repo.root().display(),
            report.head
        );
        let _ = write!(
            output,
            "{} entries, {} blobs, {} trees",
            report.entries, report.stats.blobs, report.stats.trees
        );
        Ok(output)
    }

    /// `show_content` is ANDed with the configured default
    fn handle_status(&self, show_content: bool) -> Result<String, ApiError> {
        let report = self.repo.status()?;
        let mut opts = self.config.status.render_options(self.color);
        opts.show_content &= show_content;
        Ok(format_status(&report, &self.repo.store(), &opts)?)
    }

    fn handle_check_tree(&self) -> Result<String, ApiError> {
        let opts = self.config.status.render_options(self.color);
        Ok(format_workspace_tree(&self.repo, &opts)?)
    }

    fn handle_check_path(&self, path: &Path) -> Result<String, ApiError> {
        let kind = self.repo.classify(path)?;
        Ok(format!("{}: {}", path.display(), kind))
    }

    fn handle_flush(&self) -> Result<String, ApiError> {
        self.repo.flush()?;
        Ok(format!(
            "Removed {}",
            self.repo.layout().meta_dir().display()
        ))
    }

    fn handle_config(&self) -> Result<String, ApiError> {
        let mut output = String::new();
        match &self.config_path {
            Some(path) => {
                let _ = writeln!(output, "# source: {}", path.display());
            }
            None => {
                let _ = writeln!(output, "# sources: defaults, global file, .verse/config, VERSE_* env");
            }
        }
        output.push_str(&self.config.to_toml_string()?);
        Ok(output)
    }
}
