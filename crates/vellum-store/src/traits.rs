//! Store traits: the abstract interfaces to the untrusted backends.
//!
//! Neither trait offers access control, versioning, or deletion. Callers
//! treat everything read back as attacker-controlled bytes.

use async_trait::async_trait;
use bytes::Bytes;
use vellum_core::{ObjectId, PublicKey};

use crate::error::Result;

/// Global mapping from [`ObjectId`] to opaque blobs.
///
/// `put` overwrites unconditionally. Readers must authenticate whatever
/// `get` returns.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `value` at `id`, replacing any previous value.
    async fn put(&self, id: ObjectId, value: Bytes) -> Result<()>;

    /// Fetch the value at `id`, if any.
    async fn get(&self, id: &ObjectId) -> Result<Option<Bytes>>;

    /// Check whether anything is stored at `id`.
    async fn contains(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }
}

/// Global mapping from string labels to public keys.
///
/// Append-only: publishing an existing label fails with
/// [`StoreError::LabelTaken`](crate::StoreError::LabelTaken).
#[async_trait]
pub trait KeyDirectory: Send + Sync {
    /// Publish `key` under `label`.
    async fn publish(&self, label: &str, key: PublicKey) -> Result<()>;

    /// Look up the key published under `label`.
    async fn lookup(&self, label: &str) -> Result<Option<PublicKey>>;
}
