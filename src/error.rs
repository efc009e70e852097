//! Error types for the verse snapshot engine.

use crate::command::Command;
use crate::types::ObjectId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Head not found at {0:?}. Run `verse init` first.")]
    HeadNotFound(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Maximum walk depth {max_depth} exceeded at {path:?}")]
    DepthExceeded { path: PathBuf, max_depth: usize },
}

impl StorageError {
    /// Wrap an I/O error with the path it occurred at
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for the "nothing there" family: missing objects and missing head.
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::ObjectNotFound(_) | StorageError::HeadNotFound(_) => true,
            StorageError::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Errors surfaced to the command layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Command not implemented: {0}")]
    NotImplemented(Command),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid workspace: {0}")]
    InvalidWorkspace(String),

    #[error("Input error: {0}")]
    InputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
