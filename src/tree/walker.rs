//! Directory listing for snapshot walks

use crate::error::StorageError;
use crate::repository::METADATA_DIR;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

/// Filesystem entry types
#[derive(Debug, Clone)]
pub enum Entry {
    /// A regular file (or a symlink to one, when links are followed)
    File {
        path: PathBuf,
        name: String,
        metadata: Metadata,
    },
    /// A directory (or a symlink to one, when links are followed)
    Directory {
        path: PathBuf,
        name: String,
        metadata: Metadata,
    },
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path, .. } | Entry::Directory { path, .. } => path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::File { name, .. } | Entry::Directory { name, .. } => name,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Entry::File { metadata, .. } | Entry::Directory { metadata, .. } => metadata,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }
}

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links. Unfollowed links are skipped.
    pub follow_symlinks: bool,
    /// Entry names never listed (the metadata directory)
    pub ignore_names: Vec<String>,
    /// Maximum directory nesting below the walk root
    pub max_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            ignore_names: vec![METADATA_DIR.to_string()],
            max_depth: 64,
        }
    }
}

/// Lists directories one level at a time in file-name order
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkerConfig,
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Fail if `depth` nested directories below the root is past the limit
    pub fn check_depth(&self, path: &Path, depth: usize) -> Result<(), StorageError> {
        if depth > self.config.max_depth {
            return Err(StorageError::DepthExceeded {
                path: path.to_path_buf(),
                max_depth: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// List the direct children of `dir`, sorted by file name.
    ///
    /// Ignored names, unfollowed symlinks and special files are left out.
    pub fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                let source = e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop detected")
                });
                StorageError::io(path, source)
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            if self.should_ignore(&name) {
                trace!(name = %name, "Skipping ignored entry");
                continue;
            }

            let path = entry.path().to_path_buf();
            let file_type = entry.file_type();
            if file_type.is_symlink() {
                // Only reachable when links are not followed
                trace!(path = %path.display(), "Skipping symlink");
                continue;
            }

            let metadata = entry
                .metadata()
                .map_err(|e| {
                    let source = e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::Other, "failed to read metadata")
                    });
                    StorageError::io(&path, source)
                })?;

            if metadata.is_dir() {
                entries.push(Entry::Directory {
                    path,
                    name,
                    metadata,
                });
            } else if metadata.is_file() {
                entries.push(Entry::File {
                    path,
                    name,
                    metadata,
                });
            } else {
                warn!(path = %path.display(), "Skipping special file");
            }
        }

        Ok(entries)
    }

    fn should_ignore(&self, name: &str) -> bool {
        self.config.ignore_names.iter().any(|n| n == name)
    }
}
