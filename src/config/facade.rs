//! Config loader: assembles sources in precedence order and deserializes.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, repo_file};
use crate::config::VerseConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

/// Loads `VerseConfig` from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, the repository's `.verse/config`, then `VERSE_*`
    /// environment variables.
    pub fn load(workspace_root: &Path) -> Result<VerseConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = repo_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load from an explicit file (TOML) layered over the defaults only
    pub fn load_from_file(path: &Path) -> Result<VerseConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?
            .try_deserialize()
    }
}
