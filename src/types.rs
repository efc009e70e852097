//! Core identifier types

use crate::error::StorageError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Raw digest bytes (BLAKE3, 256-bit)
pub type Hash = [u8; 32];

/// Content address of a stored object.
///
/// Rendered as 64 lowercase hex characters everywhere it leaves memory: object
/// file names, the head record and serialized tree entries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(Hash);

impl ObjectId {
    pub const LEN: usize = 32;

    pub fn from_bytes(bytes: Hash) -> Self {
        ObjectId(bytes)
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Truncated form for display, e.g. `af1349b9...`
    pub fn short(&self, width: usize) -> String {
        let hex = self.to_hex();
        let width = width.min(hex.len());
        format!("{}...", &hex[..width])
    }
}

impl FromStr for ObjectId {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| StorageError::InvalidHash(format!("{:?}: {}", s, e)))?;
        if bytes.len() != Self::LEN {
            return Err(StorageError::InvalidHash(format!(
                "{:?}: expected {} bytes, got {}",
                s,
                Self::LEN,
                bytes.len()
            )));
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes);
        Ok(ObjectId(hash))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short(12))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
