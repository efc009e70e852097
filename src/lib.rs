//! Verse: content-addressed snapshots of a working directory
//!
//! Files become blobs and directories become trees, both stored under their
//! BLAKE3 hash in `.verse/objects`. A head pointer names the latest root tree
//! and live paths can be compared against it.

pub mod changes;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod heads;
pub mod logging;
pub mod render;
pub mod repository;
pub mod store;
pub mod tree;
pub mod types;

pub use changes::{ChangeDetector, ChangeKind};
pub use error::{ApiError, StorageError};
pub use repository::Repository;
pub use types::ObjectId;
