//! Head record
//!
//! A single pointer to the root tree of the current snapshot, kept as the hex
//! id in one file. There is no history: every snapshot overwrites it.

use crate::error::StorageError;
use crate::types::ObjectId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and replaces the head record
#[derive(Debug, Clone)]
pub struct HeadTracker {
    path: PathBuf,
}

impl HeadTracker {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current head. A missing or empty record means the repository was never
    /// snapshotted.
    pub fn get(&self) -> Result<ObjectId, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::HeadNotFound(self.path.clone()));
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Err(StorageError::HeadNotFound(self.path.clone()));
        }
        trimmed.parse()
    }

    /// True once a head has been recorded
    pub fn is_set(&self) -> bool {
        self.get().is_ok()
    }

    /// Replace the head record. Written to a temp file and renamed into place.
    pub fn set(&self, id: &ObjectId) -> Result<(), StorageError> {
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, id.to_hex()).map_err(|e| StorageError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::io(&self.path, e)
        })?;
        debug!(head = %id, "Updated head");
        Ok(())
    }
}
