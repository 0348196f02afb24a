//! In-memory implementations of the store traits.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use vellum_core::{ObjectId, PublicKey};

use crate::error::{Result, StoreError};
use crate::traits::{BlobStore, KeyDirectory};

/// In-memory blob store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<ObjectId, Bytes>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Every id currently holding a value, in no particular order.
    pub fn ids(&self) -> Result<Vec<ObjectId>> {
        Ok(self.read()?.keys().copied().collect())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<ObjectId, Bytes>>> {
        self.blobs
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(&self, id: ObjectId, value: Bytes) -> Result<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        blobs.insert(id, value);
        Ok(())
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn contains(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }
}

/// In-memory key directory.
#[derive(Default)]
pub struct MemoryDirectory {
    keys: RwLock<HashMap<String, PublicKey>>,
}

impl MemoryDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyDirectory for MemoryDirectory {
    async fn publish(&self, label: &str, key: PublicKey) -> Result<()> {
        let mut keys = self
            .keys
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        if keys.contains_key(label) {
            return Err(StoreError::LabelTaken(label.to_string()));
        }
        keys.insert(label.to_string(), key);
        Ok(())
    }

    async fn lookup(&self, label: &str) -> Result<Option<PublicKey>> {
        let keys = self
            .keys
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(keys.get(label).copied())
    }
}
