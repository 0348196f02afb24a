//! CBOR encoding for records that travel inside envelopes.
//!
//! Every structured record is encoded with `ciborium` before it is sealed.
//! Decoding only ever happens after authentication, so a decode failure means
//! an authenticated writer produced bytes of the wrong shape.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CoreError, Result};

/// Serialize a record to CBOR bytes.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(buf)
}

/// Deserialize a record from CBOR bytes.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::Malformed(e.to_string()))
}
