//! Error types for Vellum core primitives.

use thiserror::Error;

/// Errors raised by the cryptographic and encoding primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Authentication tag mismatch, failed decryption, or truncated ciphertext.
    #[error("integrity check failed: {0}")]
    Integrity(String),

    /// Signature did not verify against the claimed sender.
    #[error("signature verification failed")]
    Verification,

    #[error("invalid public key")]
    InvalidPublicKey,

    /// Authenticated bytes that do not decode as the expected record.
    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    /// Rejected KDF parameters or a failed stretch.
    #[error("key derivation error: {0}")]
    KeyDerivation(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
