//! Snapshot trees
//!
//! Mirrors a working directory as immutable blobs and trees, addressed by the
//! hash of their content.

pub mod builder;
pub mod codec;
pub mod hasher;
pub mod node;
pub mod path;
pub mod walker;

pub use builder::{BuildStats, BuiltTree, TreeBuilder};
pub use node::{Blob, Tree, TreeEntry};
