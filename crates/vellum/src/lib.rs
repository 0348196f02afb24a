//! # Vellum
//!
//! Client-side encrypted file storage and sharing on top of an untrusted
//! key-value store and a trusted public-key directory.
//!
//! ## Overview
//!
//! Vellum lets users:
//!
//! - **Register and unlock** a password-protected identity from any client
//! - **Store, append to, and load** files of any size
//! - **Share** a file with another user, who may share it onward
//! - **Revoke** a direct recipient, cutting off everyone they shared with
//!
//! The store sees only opaque bytes at opaque 16-byte locations. Every read
//! is authenticated; tampered, swapped, or truncated data is reported as an
//! error and never returned.
//!
//! ## Key Concepts
//!
//! - **User**: an unlocked identity. Holding one is the only session state.
//! - **Intermediate**: a user's private resolver from filename to file head.
//! - **Share hub**: one per direct recipient; the unit of revocation.
//! - **Invitation**: a signed, sealed share left in the store for a recipient.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vellum::{Client, ClientConfig};
//! use vellum::store::{MemoryDirectory, MemoryStore};
//!
//! async fn example() -> vellum::Result<()> {
//!     let client = Client::new(
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(MemoryDirectory::new()),
//!         ClientConfig::default(),
//!     );
//!
//!     let alice = client.create_identity("alice", "correct horse").await?;
//!     let bob = client.create_identity("bob", "battery staple").await?;
//!
//!     client.store_file(&alice, "notes.txt", b"hello").await?;
//!     let invitation = client.create_invitation(&alice, "notes.txt", "bob").await?;
//!     client
//!         .accept_invitation(&bob, "alice", invitation, "from-alice.txt")
//!         .await?;
//!
//!     assert_eq!(client.load_file(&bob, "from-alice.txt").await?, b"hello");
//!
//!     client.revoke_access(&alice, "notes.txt", "bob").await?;
//!     assert!(client.load_file(&bob, "from-alice.txt").await.is_err());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `vellum::core` - Identifiers, keys, credentials and envelopes
//! - `vellum::store` - Blob store and key directory, in memory and SQLite
//! - `vellum::files` - Chunked, authenticated file chains
//! - `vellum::share` - Intermediates, share hubs and share lists

pub mod client;
pub mod error;
pub mod identity;
mod sharing;

// Re-export component crates
pub use vellum_core as core;
pub use vellum_files as files;
pub use vellum_share as share;
pub use vellum_store as store;

// Re-export main types for convenience
pub use client::{Client, ClientConfig};
pub use error::{Result, VellumError};
pub use identity::User;

pub use vellum_core::{KdfParams, ObjectId};
pub use vellum_files::{RootWidth, CHUNK_SIZE};
