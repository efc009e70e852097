//! Configuration System
//!
//! Layered configuration for walks, status rendering and logging. Sources are
//! merged by the `config` crate; see [`ConfigLoader`] for precedence.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::render::RenderOptions;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerseConfig {
    /// Directory walk settings
    #[serde(default)]
    pub walk: WalkConfig,

    /// Status rendering settings
    #[serde(default)]
    pub status: StatusConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Directory walk settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Follow symbolic links while walking
    #[serde(default = "default_true")]
    pub follow_symlinks: bool,

    /// Maximum directory nesting; guards against symlink loops
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Status rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Print file contents under each file entry
    #[serde(default = "default_true")]
    pub show_content: bool,

    /// Hex digits of truncated hashes
    #[serde(default = "default_hash_width")]
    pub hash_width: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    64
}

fn default_hash_width() -> usize {
    8
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: default_true(),
            max_depth: default_max_depth(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            show_content: default_true(),
            hash_width: default_hash_width(),
        }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("walk.max_depth must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            ..WalkerConfig::default()
        }
    }
}

impl StatusConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(4..=64).contains(&self.hash_width) {
            return Err(format!(
                "status.hash_width must be between 4 and 64, got {}",
                self.hash_width
            ));
        }
        Ok(())
    }

    pub fn render_options(&self, color: bool) -> RenderOptions {
        RenderOptions {
            show_content: self.show_content,
            hash_width: self.hash_width,
            color,
        }
    }
}

impl VerseConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        let errors: Vec<String> = [self.walk.validate(), self.status.validate()]
            .into_iter()
            .filter_map(Result::err)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }

    /// Effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
