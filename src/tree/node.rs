//! Snapshot object model: blobs, tree entries and trees

use crate::tree::hasher;
use crate::types::ObjectId;
use serde::{Deserialize, Serialize};
use std::fs::Metadata;

/// Contents of a single file. Its hash is its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub content: Vec<u8>,
}

impl Blob {
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    pub fn hash(&self) -> ObjectId {
        hasher::hash_blob(&self.content)
    }
}

/// One member of a directory snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Base file name
    pub name: String,
    /// Permission and type bits in octal, e.g. `100644`
    pub mode: String,
    /// Address of the child blob or tree
    pub hash: ObjectId,
    /// True for files, false for directories
    pub is_blob: bool,
    /// Reporting only; never persisted
    #[serde(skip)]
    pub modified: bool,
    /// Reporting only; never persisted
    #[serde(skip)]
    pub tracked: bool,
}

impl TreeEntry {
    pub fn new(name: impl Into<String>, mode: impl Into<String>, hash: ObjectId, is_blob: bool) -> Self {
        Self {
            name: name.into(),
            mode: mode.into(),
            hash,
            is_blob,
            modified: false,
            tracked: false,
        }
    }
}

// Identity ignores the transient reporting flags.
impl PartialEq for TreeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.mode == other.mode
            && self.hash == other.hash
            && self.is_blob == other.is_blob
    }
}

impl Eq for TreeEntry {}

/// Ordered contents of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: TreeEntry) {
        self.entries.push(entry);
    }

    /// Content address of this tree (see [`hasher::hash_tree`])
    pub fn hash(&self) -> ObjectId {
        hasher::hash_tree(&self.entries)
    }

    /// Look up a direct child by name
    pub fn find(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TreeEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a TreeEntry;
    type IntoIter = std::slice::Iter<'a, TreeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Render permission and type bits in octal
#[cfg(unix)]
pub fn format_mode(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:o}", metadata.permissions().mode())
}

/// Render permission and type bits in octal
#[cfg(not(unix))]
pub fn format_mode(metadata: &Metadata) -> String {
    let mode: u32 = match (metadata.is_dir(), metadata.permissions().readonly()) {
        (true, _) => 0o40755,
        (false, true) => 0o100444,
        (false, false) => 0o100644,
    };
    format!("{:o}", mode)
}
