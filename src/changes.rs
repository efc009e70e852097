//! Change detection against the head snapshot
//!
//! Compares the live hash of a workspace path with the hash recorded for the
//! same position in the head tree. Read-only: nothing is written to the store.

use crate::error::StorageError;
use crate::store::ObjectStore;
use crate::tree::hasher;
use crate::tree::node::TreeEntry;
use crate::tree::path::{normalize_name, resolve_workspace_path, WorkspacePath};
use crate::tree::walker::Walker;
use crate::types::ObjectId;
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::trace;

/// How a workspace path relates to the head snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Unchanged,
    /// Present in both, content or kind differs
    Modified,
    /// On disk, not in the snapshot
    Added,
    /// In the snapshot, gone from disk
    Deleted,
}

impl ChangeKind {
    pub fn is_changed(&self) -> bool {
        !matches!(self, ChangeKind::Unchanged)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Unchanged => "unchanged",
            ChangeKind::Modified => "modified",
            ChangeKind::Added => "added",
            ChangeKind::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

/// Resolve a path inside a stored snapshot.
///
/// Walks the trees under `root` along `components` and returns the entry at
/// the end, or `None` if any step is missing or passes through a file. An
/// empty component list has no entry.
pub fn resolve_entry<S: ObjectStore + ?Sized>(
    store: &S,
    root: &ObjectId,
    components: &[String],
) -> Result<Option<TreeEntry>, StorageError> {
    let Some((last, parents)) = components.split_last() else {
        return Ok(None);
    };

    let mut tree = store.get_tree(root)?;
    for component in parents {
        match find_normalized(&tree.entries, component) {
            Some(entry) if !entry.is_blob => {
                let next = entry.hash;
                tree = store.get_tree(&next)?;
            }
            _ => return Ok(None),
        }
    }

    Ok(find_normalized(&tree.entries, last).cloned())
}

fn find_normalized<'t>(entries: &'t [TreeEntry], name: &str) -> Option<&'t TreeEntry> {
    entries.iter().find(|e| normalize_name(&e.name) == name)
}

/// Classifies workspace paths against one head snapshot
pub struct ChangeDetector<'a, S: ObjectStore + ?Sized> {
    root: PathBuf,
    store: &'a S,
    head: ObjectId,
    walker: Walker,
}

impl<'a, S: ObjectStore + ?Sized> ChangeDetector<'a, S> {
    pub fn new(root: impl Into<PathBuf>, store: &'a S, head: ObjectId) -> Self {
        Self {
            root: root.into(),
            store,
            head,
            walker: Walker::new(),
        }
    }

    /// Must match the walker used to build the snapshot
    pub fn with_walker(mut self, walker: Walker) -> Self {
        self.walker = walker;
        self
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    pub fn is_changed(&self, path: &Path) -> Result<bool, StorageError> {
        Ok(self.classify(path)?.is_changed())
    }

    pub fn classify(&self, path: &Path) -> Result<ChangeKind, StorageError> {
        let WorkspacePath {
            disk: target,
            components,
        } = resolve_workspace_path(&self.root, path)?;

        // Ignored names (the metadata directory) are never part of a snapshot
        let ignored = &self.walker.config().ignore_names;
        if components.iter().any(|c| ignored.contains(c)) {
            return Ok(ChangeKind::Unchanged);
        }

        if components.is_empty() {
            let live = hasher::hash_directory(&target, &self.walker)?;
            return Ok(if live == self.head {
                ChangeKind::Unchanged
            } else {
                ChangeKind::Modified
            });
        }

        let live = self.live_metadata(&target)?;
        let recorded = resolve_entry(self.store, &self.head, &components)?;

        let kind = match (live, recorded) {
            (None, None) => {
                return Err(StorageError::io(
                    &target,
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "path is neither on disk nor in the snapshot",
                    ),
                ));
            }
            (None, Some(_)) => ChangeKind::Deleted,
            (Some(_), None) => ChangeKind::Added,
            (Some(metadata), Some(entry)) => {
                if metadata.is_dir() == entry.is_blob {
                    ChangeKind::Modified
                } else if self.live_hash(&target, &metadata)? == entry.hash {
                    ChangeKind::Unchanged
                } else {
                    ChangeKind::Modified
                }
            }
        };

        trace!(path = %target.display(), kind = %kind, "Classified path");
        Ok(kind)
    }

    fn live_metadata(&self, target: &Path) -> Result<Option<Metadata>, StorageError> {
        let result = if self.walker.config().follow_symlinks {
            std::fs::metadata(target)
        } else {
            std::fs::symlink_metadata(target)
        };
        match result {
            // Walks never record unfollowed links or special files
            Ok(m) if m.is_dir() || m.is_file() => Ok(Some(m)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(target, e)),
        }
    }

    fn live_hash(&self, target: &Path, metadata: &Metadata) -> Result<ObjectId, StorageError> {
        if metadata.is_dir() {
            hasher::hash_directory(target, &self.walker)
        } else {
            hasher::hash_file(target)
        }
    }
}
