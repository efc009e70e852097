//! Tree encoding for the object store
//!
//! Trees are stored as JSON. The empty tree is the one exception: it encodes to
//! zero bytes, because its address coincides with the address of an empty file
//! and both must resolve to the same stored object.

use crate::error::StorageError;
use crate::tree::node::Tree;

/// Encode a tree for storage
pub fn encode(tree: &Tree) -> Result<Vec<u8>, StorageError> {
    if tree.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::to_vec(tree)
        .map_err(|e| StorageError::Serialization(format!("Failed to encode tree: {}", e)))
}

/// Decode a stored tree. Transient entry flags come back false.
pub fn decode(bytes: &[u8]) -> Result<Tree, StorageError> {
    if bytes.is_empty() {
        return Ok(Tree::new());
    }
    serde_json::from_slice(bytes)
        .map_err(|e| StorageError::Serialization(format!("Failed to decode tree: {}", e)))
}
