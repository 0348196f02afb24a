//! On-store file records.
//!
//! A file is a [`FileHead`] plus a singly linked chain of [`FileBody`] nodes,
//! each pointing at one content block. The head carries the chain length so
//! loads never trust a `next` pointer past the last node.

use serde::{Deserialize, Serialize};

use vellum_core::{codec, envelope, ObjectId, SymmetricKeys};

use crate::error::Result;
use crate::schedule::RootSecrets;

/// Where a file head lives and the keys it is sealed under.
///
/// This is exactly what an owner intermediate or a share hub resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadLocation {
    pub id: ObjectId,
    pub keys: SymmetricKeys,
}

impl HeadLocation {
    pub fn new(id: ObjectId, keys: SymmetricKeys) -> Self {
        Self { id, keys }
    }

    /// A fresh random location with fresh random keys.
    pub fn generate() -> Self {
        Self::new(ObjectId::random(), SymmetricKeys::generate())
    }
}

/// Root of one file version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHead {
    pub roots: RootSecrets,
    pub first: ObjectId,
    pub last: ObjectId,
    /// Number of nodes in the chain, never zero.
    pub length: u64,
}

impl FileHead {
    pub fn seal(&self, keys: &SymmetricKeys) -> Result<Vec<u8>> {
        Ok(envelope::seal(&codec::to_bytes(self)?, keys)?)
    }

    pub fn open(sealed: &[u8], keys: &SymmetricKeys) -> Result<Self> {
        let plaintext = envelope::authenticate_then_decrypt(sealed, keys)?;
        Ok(codec::from_bytes(&plaintext)?)
    }
}

/// One link in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBody {
    pub block: ObjectId,
    pub next: Option<ObjectId>,
}

impl FileBody {
    pub fn seal(&self, keys: &SymmetricKeys) -> Result<Vec<u8>> {
        Ok(envelope::seal(&codec::to_bytes(self)?, keys)?)
    }

    pub fn open(sealed: &[u8], keys: &SymmetricKeys) -> Result<Self> {
        let plaintext = envelope::authenticate_then_decrypt(sealed, keys)?;
        Ok(codec::from_bytes(&plaintext)?)
    }
}
