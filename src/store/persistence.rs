//! Filesystem persistence for the object store

use crate::error::StorageError;
use crate::store::ObjectStore;
use crate::types::ObjectId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Flat directory of objects, one file per object named by its hex id.
///
/// `{root}/{hex}`. No sharding: a single snapshot of a working directory
/// stays small enough for one directory.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at `root`. The directory is created by the first
    /// `put`; reads from a missing directory find nothing.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root path of this storage
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the filesystem path for a given object id
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.root.join(id.to_hex())
    }
}

impl ObjectStore for FsObjectStore {
    /// Uses atomic writes (write to .tmp, then rename). Existing objects are
    /// left untouched.
    fn put(&self, id: &ObjectId, bytes: &[u8]) -> Result<(), StorageError> {
        let object_path = self.object_path(id);
        if object_path.exists() {
            trace!(id = %id, "Object already stored");
            return Ok(());
        }

        // Create the objects directory on first write
        fs::create_dir_all(&self.root).map_err(|e| StorageError::io(&self.root, e))?;

        let temp_path = object_path.with_extension("tmp");
        fs::write(&temp_path, bytes).map_err(|e| StorageError::io(&temp_path, e))?;

        fs::rename(&temp_path, &object_path).map_err(|e| {
            // Clean up temp file on error
            let _ = fs::remove_file(&temp_path);
            StorageError::io(&object_path, e)
        })?;

        debug!(id = %id, size = bytes.len(), "Stored object");
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> Result<Vec<u8>, StorageError> {
        let object_path = self.object_path(id);
        match fs::read(&object_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::ObjectNotFound(*id))
            }
            Err(e) => Err(StorageError::io(&object_path, e)),
        }
    }

    fn contains(&self, id: &ObjectId) -> Result<bool, StorageError> {
        Ok(self.object_path(id).is_file())
    }

    /// Temp files and foreign names are skipped.
    fn list(&self) -> Result<Vec<ObjectId>, StorageError> {
        let dir = fs::read_dir(&self.root).map_err(|e| StorageError::io(&self.root, e))?;

        let mut ids = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| StorageError::io(&self.root, e))?;
            let name = entry.file_name();
            if let Ok(id) = name.to_string_lossy().parse::<ObjectId>() {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}
