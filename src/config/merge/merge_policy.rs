//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones key by key: defaults, then the global
/// file, then the repository file, then the environment.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("walk.follow_symlinks", true)?
        .set_default("walk.max_depth", 64_i64)?
        .set_default("status.show_content", true)?
        .set_default("status.hash_width", 8_i64)
}
