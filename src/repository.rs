//! Repository handle
//!
//! Every operation is keyed off an explicit `Repository` value holding the
//! workspace root and walk settings.

use crate::changes::{ChangeDetector, ChangeKind};
use crate::error::StorageError;
use crate::heads::HeadTracker;
use crate::store::{FsObjectStore, ObjectStore};
use crate::tree::builder::{BuildStats, TreeBuilder};
use crate::tree::node::Tree;
use crate::tree::walker::{Walker, WalkerConfig};
use crate::types::ObjectId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Name of the metadata directory at the workspace root
pub const METADATA_DIR: &str = ".verse";

/// On-disk layout of a repository
#[derive(Debug, Clone)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.meta_dir().join("objects")
    }

    /// Reserved for tag objects
    pub fn tags_dir(&self) -> PathBuf {
        self.meta_dir().join("tags")
    }

    pub fn config_file(&self) -> PathBuf {
        self.meta_dir().join("config")
    }

    pub fn head_file(&self) -> PathBuf {
        self.meta_dir().join("head")
    }
}

/// Outcome of a snapshot
#[derive(Debug, Clone)]
pub struct InitReport {
    pub head: ObjectId,
    /// Top-level entries of the root tree
    pub entries: usize,
    pub stats: BuildStats,
}

/// Head pointer and the root tree it names
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub head: ObjectId,
    pub tree: Tree,
}

/// A working directory and its `.verse` metadata
#[derive(Debug, Clone)]
pub struct Repository {
    layout: RepoLayout,
    walker_config: WalkerConfig,
}

impl Repository {
    pub fn open<P: AsRef<Path>>(root: P) -> Self {
        Self {
            layout: RepoLayout::new(root),
            walker_config: WalkerConfig::default(),
        }
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn walker_config(&self) -> &WalkerConfig {
        &self.walker_config
    }

    pub fn store(&self) -> FsObjectStore {
        FsObjectStore::new(self.layout.objects_dir())
    }

    pub fn head(&self) -> HeadTracker {
        HeadTracker::new(self.layout.head_file())
    }

    /// True once a snapshot has set the head
    pub fn is_initialized(&self) -> bool {
        self.head().is_set()
    }

    /// (Re-)create the metadata layout and snapshot the working directory.
    ///
    /// The head moves only after the root tree is stored. A failed walk leaves
    /// the previous head in place; objects it already wrote stay behind.
    #[instrument(skip(self), fields(workspace = %self.root().display()))]
    pub fn init(&self) -> Result<InitReport, StorageError> {
        self.create_layout()?;

        let store = self.store();
        let built = TreeBuilder::new(self.root().to_path_buf(), &store)
            .with_walker_config(self.walker_config.clone())
            .build()?;

        let head = store.put_tree(&built.root)?;
        let mut stats = built.stats;
        stats.trees += 1;
        self.head().set(&head)?;

        info!(head = %head, blobs = stats.blobs, trees = stats.trees, "Snapshot recorded");
        Ok(InitReport {
            head,
            entries: built.root.len(),
            stats,
        })
    }

    fn create_layout(&self) -> Result<(), StorageError> {
        for dir in [
            self.layout.meta_dir(),
            self.layout.objects_dir(),
            self.layout.tags_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        }

        // Placeholder; never truncated so user settings survive re-init
        let config_file = self.layout.config_file();
        if !config_file.exists() {
            fs::write(&config_file, "").map_err(|e| StorageError::io(&config_file, e))?;
        }
        Ok(())
    }

    /// Current head and its root tree
    pub fn status(&self) -> Result<StatusReport, StorageError> {
        let head = self.head().get()?;
        let tree = self.store().get_tree(&head)?;
        Ok(StatusReport { head, tree })
    }

    /// Delete all repository state. Absent metadata is not an error.
    #[instrument(skip(self), fields(workspace = %self.root().display()))]
    pub fn flush(&self) -> Result<(), StorageError> {
        let meta = self.layout.meta_dir();
        match fs::remove_dir_all(&meta) {
            Ok(()) => {
                info!("Removed repository metadata");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %meta.display(), "Nothing to flush");
                Ok(())
            }
            Err(e) => Err(StorageError::io(&meta, e)),
        }
    }

    /// Compare `path` with the head snapshot
    pub fn classify(&self, path: &Path) -> Result<ChangeKind, StorageError> {
        let head = self.head().get()?;
        let store = self.store();
        ChangeDetector::new(self.root(), &store, head)
            .with_walker(Walker::with_config(self.walker_config.clone()))
            .classify(path)
    }

    /// True if `path` differs from the head snapshot or is not in it
    pub fn check_changed(&self, path: &Path) -> Result<bool, StorageError> {
        Ok(self.classify(path)?.is_changed())
    }
}
