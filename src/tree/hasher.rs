//! Hash computation for blobs, trees and live directories using BLAKE3
//!
//! A tree's address is the hash of its entries' hex hashes concatenated in
//! order. Names and modes take no part in it, so two trees whose children have
//! the same content in the same order share one address even when the
//! children are named differently.

use crate::error::StorageError;
use crate::tree::node::TreeEntry;
use crate::tree::walker::{Entry, Walker};
use crate::types::ObjectId;
use blake3::Hasher;
use std::path::Path;
use tracing::trace;

/// Hash arbitrary bytes
pub fn compute_hash(data: &[u8]) -> ObjectId {
    let mut hasher = Hasher::new();
    hasher.update(data);
    ObjectId::from_bytes(*hasher.finalize().as_bytes())
}

/// Address of a blob: the hash of its raw content
pub fn hash_blob(content: &[u8]) -> ObjectId {
    compute_hash(content)
}

/// Address of a tree: the hash of its child hashes (hex) in entry order
pub fn hash_tree(entries: &[TreeEntry]) -> ObjectId {
    fold_hashes(entries.iter().map(|e| &e.hash))
}

fn fold_hashes<'a>(hashes: impl Iterator<Item = &'a ObjectId>) -> ObjectId {
    let mut hasher = Hasher::new();
    for hash in hashes {
        hasher.update(hash.to_hex().as_bytes());
    }
    ObjectId::from_bytes(*hasher.finalize().as_bytes())
}

/// Hash the current content of a file on disk
pub fn hash_file(path: &Path) -> Result<ObjectId, StorageError> {
    let content = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
    Ok(hash_blob(&content))
}

/// Hash a live directory without touching the object store.
///
/// Children are listed the same way the tree builder lists them, so the
/// result equals [`hash_tree`] of the tree a snapshot of `path` would store.
pub fn hash_directory(path: &Path, walker: &Walker) -> Result<ObjectId, StorageError> {
    hash_directory_at(path, walker, 0)
}

fn hash_directory_at(path: &Path, walker: &Walker, depth: usize) -> Result<ObjectId, StorageError> {
    walker.check_depth(path, depth)?;

    let mut child_hashes = Vec::new();
    for entry in walker.list(path)? {
        let hash = match &entry {
            Entry::Directory { path, .. } => hash_directory_at(path, walker, depth + 1)?,
            Entry::File { path, .. } => hash_file(path)?,
        };
        child_hashes.push(hash);
    }

    let hash = fold_hashes(child_hashes.iter());
    trace!(path = %path.display(), hash = %hash, "Hashed directory");
    Ok(hash)
}
