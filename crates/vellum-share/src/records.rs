//! Indirection records between a filename and the file head behind it.
//!
//! ```text
//! owner:     Intermediate::Owner  ──────────────────────────► FileHead
//! recipient: Intermediate::Shared ──► ShareHub ──────────────► FileHead
//! ```
//!
//! Revocation rewrites hubs, never recipients' intermediates, so one hub per
//! direct recipient is the unit of revocation. Everyone downstream of a
//! recipient forwards that recipient's [`Share`] and therefore resolves
//! through the same hub.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use vellum_core::{codec, envelope, ObjectId, SymmetricKeys};
use vellum_files::HeadLocation;

use crate::error::Result;

/// Size of the random bytes that replace a revoked hub.
const REVOKED_HUB_LEN: usize = 160;

/// A user's resolver for one filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intermediate {
    /// The user stored this file; points straight at the head.
    Owner { head: HeadLocation },
    /// The user accepted this file; points at a share hub.
    Shared { share: Share },
}

impl Intermediate {
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner { .. })
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(codec::to_bytes(self)?)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(codec::from_bytes(bytes)?)
    }
}

/// Pointer from one direct recipient's branch to the current file head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareHub {
    pub head: HeadLocation,
}

impl ShareHub {
    pub fn new(head: HeadLocation) -> Self {
        Self { head }
    }

    /// Encrypt-then-authenticate under the hub's own keys.
    pub fn seal(&self, keys: &SymmetricKeys) -> Result<Vec<u8>> {
        Ok(envelope::seal(&codec::to_bytes(self)?, keys)?)
    }

    pub fn open(sealed: &[u8], keys: &SymmetricKeys) -> Result<Self> {
        let plaintext = envelope::authenticate_then_decrypt(sealed, keys)?;
        Ok(codec::from_bytes(&plaintext)?)
    }

    /// Random bytes that no hub key can ever authenticate.
    pub fn revoked_placeholder() -> Vec<u8> {
        let mut bytes = vec![0u8; REVOKED_HUB_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes
    }
}

/// Invitation payload: where a hub lives and how to open it.
///
/// Forwarded unchanged on re-share, so the whole subtree below a direct
/// recipient shares one hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub hub: ObjectId,
    pub keys: SymmetricKeys,
}

impl Share {
    pub fn new(hub: ObjectId, keys: SymmetricKeys) -> Self {
        Self { hub, keys }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(codec::to_bytes(self)?)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(codec::from_bytes(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShareError;
    use vellum_core::CoreError;

    #[test]
    fn test_intermediate_variants_roundtrip() {
        let owner = Intermediate::Owner {
            head: HeadLocation::generate(),
        };
        let shared = Intermediate::Shared {
            share: Share::new(ObjectId::random(), SymmetricKeys::generate()),
        };

        assert!(owner.is_owner());
        assert!(!shared.is_owner());
        assert_eq!(Intermediate::from_bytes(&owner.to_bytes().unwrap()).unwrap(), owner);
        assert_eq!(Intermediate::from_bytes(&shared.to_bytes().unwrap()).unwrap(), shared);
    }

    #[test]
    fn test_hub_seal_open() {
        let keys = SymmetricKeys::generate();
        let hub = ShareHub::new(HeadLocation::generate());
        let sealed = hub.seal(&keys).unwrap();
        assert_eq!(ShareHub::open(&sealed, &keys).unwrap(), hub);
    }

    #[test]
    fn test_revoked_placeholder_never_opens() {
        let keys = SymmetricKeys::generate();
        let garbage = ShareHub::revoked_placeholder();
        assert!(matches!(
            ShareHub::open(&garbage, &keys),
            Err(ShareError::Core(CoreError::Integrity(_)))
        ));
        assert_ne!(garbage, ShareHub::revoked_placeholder());
    }

    #[test]
    fn test_share_bytes_are_not_an_intermediate() {
        let share = Share::new(ObjectId::random(), SymmetricKeys::generate());
        assert!(Intermediate::from_bytes(&share.to_bytes().unwrap()).is_err());
    }
}
