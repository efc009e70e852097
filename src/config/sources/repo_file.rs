//! Repository config file source: `.verse/config` (TOML, may be empty)

use crate::repository::RepoLayout;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::Path;

/// Add the repository's config file to builder. The file has no extension,
/// so the format is fixed to TOML.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = RepoLayout::new(workspace_root).config_file();
    if !path.is_file() {
        return Ok(builder);
    }
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
