//! # Vellum Core
//!
//! Pure primitives for Vellum: object ids, credential derivation, and the
//! authenticated envelopes that protect every object on the store.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`ObjectId`] - 128-bit storage location, random or derived from names
//! - [`SymmetricKeys`] - (encryption, authentication) key pair
//! - [`Keypair`] / [`Ed25519PublicKey`] - signing identity
//! - [`X25519StaticSecret`] / [`X25519PublicKey`] - sealing identity
//! - [`PublicKey`] - a key as held by the public directory
//!
//! ## Envelopes
//!
//! See [`envelope`] for the symmetric and sealed wire layouts.

pub mod codec;
pub mod credential;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod types;

pub use credential::KdfParams;
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::{CoreError, Result};
pub use keys::{
    EncryptionKey, EncryptionNonce, EphemeralKeyPair, PublicKey, SharedKey, SymmetricKeys,
    X25519PublicKey, X25519StaticSecret,
};
pub use types::ObjectId;
