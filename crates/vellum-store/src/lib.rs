//! # Vellum Store
//!
//! The two external collaborators Vellum relies on, behind async traits: a
//! global blob store addressed by [`ObjectId`](vellum_core::ObjectId), and a
//! public-key directory addressed by string labels.
//!
//! ## Key Types
//!
//! - [`BlobStore`] - `put`/`get` over opaque bytes
//! - [`KeyDirectory`] - append-only `publish`/`lookup` of public keys
//! - [`SqliteStore`] - SQLite-backed implementation of both
//! - [`MemoryStore`] / [`MemoryDirectory`] - in-memory implementations for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use vellum_core::ObjectId;
//! use vellum_store::{BlobStore, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("vellum.db").unwrap();
//!     let id = ObjectId::random();
//!     store.put(id, Bytes::from_static(b"ciphertext")).await.unwrap();
//!     let _value = store.get(&id).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Untrusted**: backends never interpret values; integrity is the caller's job
//! - **Overwrite**: `put` replaces any previous value at the same id
//! - **Append-only directory**: republishing a label is rejected

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::{MemoryDirectory, MemoryStore};
pub use sqlite::SqliteStore;
pub use traits::{BlobStore, KeyDirectory};
