//! Strong type definitions for Vellum.
//!
//! Store locations are newtypes so a key or hash can never be passed where
//! an address is expected.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain prefix for deterministic object ids.
const OBJECT_DOMAIN: &[u8] = b"vellum-object-v1:";

/// A 128-bit storage location.
///
/// Either drawn at random (file nodes, content blocks, invitations, heads)
/// or derived from names for records that must be found again without any
/// other state (identities, intermediates, share hubs, share lists).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub [u8; 16]);

impl ObjectId {
    /// Create a new ObjectId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Draw a fresh location uniformly at random.
    pub fn random() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derive a location from a purpose tag and a list of names.
    ///
    /// Every field is length-prefixed, so `("ab", "c")` and `("a", "bc")`
    /// land on different ids.
    pub fn derive(purpose: &str, fields: &[&str]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(OBJECT_DOMAIN);
        hasher.update(&(purpose.len() as u64).to_be_bytes());
        hasher.update(purpose.as_bytes());
        for field in fields {
            hasher.update(&(field.len() as u64).to_be_bytes());
            hasher.update(field.as_bytes());
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hasher.finalize().as_bytes()[..16]);
        Self(bytes)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 16 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 16]> for ObjectId {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 16] = slice.try_into()?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_hex_roundtrip() {
        let id = ObjectId::from_bytes([0x42; 16]);
        let recovered = ObjectId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, recovered);
        assert!(ObjectId::from_hex("abcd").is_err());
    }

    #[test]
    fn test_object_id_display() {
        let id = ObjectId::from_bytes([0xab; 16]);
        assert_eq!(format!("{}", id), "abababababababababababababababab");
        assert!(format!("{:?}", id).starts_with("ObjectId("));
    }

    #[test]
    fn test_derive_is_deterministic() {
        let a = ObjectId::derive("intermediate", &["alice", "notes.txt"]);
        let b = ObjectId::derive("intermediate", &["alice", "notes.txt"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_separates_fields_and_purposes() {
        let split_a = ObjectId::derive("intermediate", &["ab", "c"]);
        let split_b = ObjectId::derive("intermediate", &["a", "bc"]);
        assert_ne!(split_a, split_b);

        let identity = ObjectId::derive("identity", &["alice"]);
        let share_list = ObjectId::derive("share-list", &["alice"]);
        assert_ne!(identity, share_list);
    }

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(ObjectId::random(), ObjectId::random());
    }
}
