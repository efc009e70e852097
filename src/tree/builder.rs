//! Tree builder: snapshots a working directory into the object store

use crate::error::StorageError;
use crate::store::ObjectStore;
use crate::tree::node::{format_mode, Blob, Tree, TreeEntry};
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use crate::types::ObjectId;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Counts of objects written during one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub blobs: usize,
    pub trees: usize,
}

/// Result of a build: the root tree (not yet stored) and the walk counts
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub root: Tree,
    pub stats: BuildStats,
}

impl BuiltTree {
    pub fn root_id(&self) -> ObjectId {
        self.root.hash()
    }
}

/// Depth-first snapshot builder.
///
/// Every blob and every subtree is stored as soon as it is complete. The root
/// tree is returned to the caller, which decides when to store it and move the
/// head.
pub struct TreeBuilder<'a, S: ObjectStore + ?Sized> {
    root: PathBuf,
    store: &'a S,
    walker: Walker,
}

impl<'a, S: ObjectStore + ?Sized> TreeBuilder<'a, S> {
    /// Create a new tree builder for the given root path
    pub fn new(root: PathBuf, store: &'a S) -> Self {
        Self {
            root,
            store,
            walker: Walker::new(),
        }
    }

    /// Set walker config (symlinks, ignored names, depth guard)
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker = Walker::with_config(config);
        self
    }

    /// Walk the root directory, storing every blob and subtree on the way.
    #[instrument(skip(self), fields(workspace = %self.root.display()))]
    pub fn build(&self) -> Result<BuiltTree, StorageError> {
        let start = Instant::now();
        info!("Starting tree build");

        let mut stats = BuildStats::default();
        let root = self.build_dir(&self.root, 0, &mut stats)?;

        info!(
            entries = root.len(),
            blobs = stats.blobs,
            trees = stats.trees,
            root = %root.hash(),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );

        Ok(BuiltTree { root, stats })
    }

    fn build_dir(
        &self,
        dir: &Path,
        depth: usize,
        stats: &mut BuildStats,
    ) -> Result<Tree, StorageError> {
        self.walker.check_depth(dir, depth)?;

        let mut tree = Tree::new();
        for entry in self.walker.list(dir)? {
            let tree_entry = match &entry {
                Entry::File { path, name, metadata } => {
                    let id = self.store_file(path)?;
                    stats.blobs += 1;
                    TreeEntry::new(name.clone(), format_mode(metadata), id, true)
                }
                Entry::Directory { path, name, metadata } => {
                    let child = self.build_dir(path, depth + 1, stats)?;
                    let id = self.store.put_tree(&child)?;
                    stats.trees += 1;
                    debug!(path = %path.display(), id = %id, entries = child.len(), "Stored tree");
                    TreeEntry::new(name.clone(), format_mode(metadata), id, false)
                }
            };
            tree.push(tree_entry);
        }

        Ok(tree)
    }

    fn store_file(&self, path: &Path) -> Result<ObjectId, StorageError> {
        let content = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
        let id = self.store.put_blob(&Blob::new(content))?;
        trace!(path = %path.display(), id = %id, "Stored blob");
        Ok(id)
    }
}
