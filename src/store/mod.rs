//! Object Store
//!
//! Append-only, content-addressed storage for blobs and serialized trees.
//! Keys are object hashes; an object is never changed after its first write.

pub mod persistence;

pub use persistence::FsObjectStore;

use crate::error::StorageError;
use crate::tree::codec;
use crate::tree::node::{Blob, Tree};
use crate::types::ObjectId;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Object store interface
pub trait ObjectStore {
    /// Store `bytes` under `id`. Writing an id that already exists is a no-op.
    fn put(&self, id: &ObjectId, bytes: &[u8]) -> Result<(), StorageError>;

    /// Fetch the bytes stored under `id`, or `ObjectNotFound`
    fn get(&self, id: &ObjectId) -> Result<Vec<u8>, StorageError>;

    fn contains(&self, id: &ObjectId) -> Result<bool, StorageError>;

    /// All stored ids, sorted
    fn list(&self) -> Result<Vec<ObjectId>, StorageError>;

    fn put_blob(&self, blob: &Blob) -> Result<ObjectId, StorageError> {
        let id = blob.hash();
        self.put(&id, &blob.content)?;
        Ok(id)
    }

    fn get_blob(&self, id: &ObjectId) -> Result<Blob, StorageError> {
        Ok(Blob::new(self.get(id)?))
    }

    fn put_tree(&self, tree: &Tree) -> Result<ObjectId, StorageError> {
        let id = tree.hash();
        self.put(&id, &codec::encode(tree)?)?;
        Ok(id)
    }

    fn get_tree(&self, id: &ObjectId) -> Result<Tree, StorageError> {
        codec::decode(&self.get(id)?)
    }
}

/// In-memory object store for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<BTreeMap<ObjectId, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::io(
        "<memory>",
        std::io::Error::new(std::io::ErrorKind::Other, "object map lock poisoned"),
    )
}

impl ObjectStore for MemoryObjectStore {
    fn put(&self, id: &ObjectId, bytes: &[u8]) -> Result<(), StorageError> {
        let mut objects = self.objects.write().map_err(|_| poisoned())?;
        objects.entry(*id).or_insert_with(|| bytes.to_vec());
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> Result<Vec<u8>, StorageError> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        objects
            .get(id)
            .cloned()
            .ok_or(StorageError::ObjectNotFound(*id))
    }

    fn contains(&self, id: &ObjectId) -> Result<bool, StorageError> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        Ok(objects.contains_key(id))
    }

    fn list(&self) -> Result<Vec<ObjectId>, StorageError> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        Ok(objects.keys().copied().collect())
    }
}
