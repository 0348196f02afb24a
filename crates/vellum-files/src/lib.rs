//! # Vellum Files
//!
//! Chunked file storage on an untrusted blob store.
//!
//! ## Overview
//!
//! A file is a sealed [`FileHead`] and a singly linked chain of sealed
//! [`FileBody`] nodes, each pointing at one sealed content block of at most
//! [`CHUNK_SIZE`] bytes. Every node and block key is derived from the head's
//! two root secrets and the node's position (see [`schedule`]), so:
//!
//! - Appends only rewrite the previous tail node and the head
//! - Loads authenticate every object and fail closed on any gap
//! - Replacing the head with fresh roots orphans the whole old chain
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vellum_files::{FileEngine, HeadLocation, RootWidth};
//! use vellum_store::MemoryStore;
//!
//! async fn example() {
//!     let engine = FileEngine::new(Arc::new(MemoryStore::new()), RootWidth::default());
//!     let at = HeadLocation::generate();
//!     engine.create(&at, b"hello").await.unwrap();
//!     engine.append(&at, b", world").await.unwrap();
//!     assert_eq!(engine.load(&at).await.unwrap(), b"hello, world");
//! }
//! ```

pub mod engine;
pub mod error;
pub mod records;
pub mod schedule;

pub use engine::{FileEngine, CHUNK_SIZE};
pub use error::{FilesError, Result};
pub use records::{FileBody, FileHead, HeadLocation};
pub use schedule::{PositionKeys, RootSecrets, RootWidth};
