//! SQLite implementation of the store traits.
//!
//! One database file backs both the blob store and the key directory. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use vellum_core::{codec, ObjectId, PublicKey};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{BlobStore, KeyDirectory};

/// SQLite-based store and directory.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
#[derive(Clone)]
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(format!("mutex poisoned: {}", e)))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(format!("spawn_blocking failed: {}", e)))?
    }
}

#[async_trait]
impl BlobStore for SqliteStore {
    async fn put(&self, id: ObjectId, value: Bytes) -> Result<()> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO blobs (object_id, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(object_id) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![id.as_bytes().as_slice(), value.as_ref(), now_millis()],
            )?;
            Ok(())
        })
        .await
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Bytes>> {
        let id = *id;
        self.with_conn(move |conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM blobs WHERE object_id = ?1",
                    params![id.as_bytes().as_slice()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value.map(Bytes::from))
        })
        .await
    }

    async fn contains(&self, id: &ObjectId) -> Result<bool> {
        let id = *id;
        self.with_conn(move |conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM blobs WHERE object_id = ?1",
                    params![id.as_bytes().as_slice()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
    }
}

#[async_trait]
impl KeyDirectory for SqliteStore {
    async fn publish(&self, label: &str, key: PublicKey) -> Result<()> {
        let label = label.to_string();
        let encoded =
            codec::to_bytes(&key).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.with_conn(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO directory (label, public_key, published_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(label) DO NOTHING",
                params![label, encoded, now_millis()],
            )?;
            if inserted == 0 {
                return Err(StoreError::LabelTaken(label));
            }
            Ok(())
        })
        .await
    }

    async fn lookup(&self, label: &str) -> Result<Option<PublicKey>> {
        let label = label.to_string();
        let encoded = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT public_key FROM directory WHERE label = ?1",
                    params![label],
                    |row| row.get::<_, Vec<u8>>(0),
                )
                .optional()
                .map_err(StoreError::from)
            })
            .await?;

        encoded
            .map(|bytes| {
                codec::from_bytes(&bytes).map_err(|e| StoreError::InvalidData(e.to_string()))
            })
            .transpose()
    }
}
