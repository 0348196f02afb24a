//! The owner's record of who each file was shared with.
//!
//! Only the owner of a file writes entries here. Revocation consults it to
//! find the revoked hub and every sibling hub that must be re-pointed.

use serde::{Deserialize, Serialize};

use vellum_core::codec;

use crate::error::{Result, ShareError};
use crate::records::Share;

/// One direct share: `filename` given to `recipient` through `share`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub filename: String,
    pub recipient: String,
    pub share: Share,
}

/// Ordered list of an owner's direct shares.
///
/// At most one entry exists per (filename, recipient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareList {
    entries: Vec<ShareEntry>,
}

impl ShareList {
    /// Create a new empty share list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The share given to `recipient` for `filename`, if any.
    pub fn find(&self, filename: &str, recipient: &str) -> Option<&Share> {
        self.entries
            .iter()
            .find(|e| e.filename == filename && e.recipient == recipient)
            .map(|e| &e.share)
    }

    /// Record a share, replacing any existing entry for the same pair.
    pub fn upsert(&mut self, filename: &str, recipient: &str, share: Share) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.filename == filename && e.recipient == recipient)
        {
            Some(entry) => entry.share = share,
            None => self.entries.push(ShareEntry {
                filename: filename.to_string(),
                recipient: recipient.to_string(),
                share,
            }),
        }
    }

    /// Remove and return the entry for (filename, recipient).
    pub fn remove(&mut self, filename: &str, recipient: &str) -> Result<ShareEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.filename == filename && e.recipient == recipient)
            .ok_or_else(|| ShareError::EntryNotFound {
                filename: filename.to_string(),
                recipient: recipient.to_string(),
            })?;
        Ok(self.entries.remove(position))
    }

    /// Every entry for `filename`, in insertion order.
    pub fn for_file<'a>(&'a self, filename: &'a str) -> impl Iterator<Item = &'a ShareEntry> + 'a {
        self.entries.iter().filter(move |e| e.filename == filename)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShareEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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
    use proptest::prelude::*;
    use vellum_core::{ObjectId, SymmetricKeys};

    fn share() -> Share {
        Share::new(ObjectId::random(), SymmetricKeys::generate())
    }

    #[test]
    fn test_upsert_and_find() {
        let mut list = ShareList::new();
        let to_bob = share();
        list.upsert("a.txt", "bob", to_bob.clone());
        list.upsert("a.txt", "carol", share());
        list.upsert("b.txt", "bob", share());

        assert_eq!(list.len(), 3);
        assert_eq!(list.find("a.txt", "bob"), Some(&to_bob));
        assert!(list.find("a.txt", "dave").is_none());
        assert!(list.find("c.txt", "bob").is_none());
    }

    #[test]
    fn test_upsert_same_pair_replaces() {
        let mut list = ShareList::new();
        list.upsert("a.txt", "bob", share());
        let replacement = share();
        list.upsert("a.txt", "bob", replacement.clone());

        assert_eq!(list.len(), 1);
        assert_eq!(list.find("a.txt", "bob"), Some(&replacement));
    }

    #[test]
    fn test_remove_and_for_file() {
        let mut list = ShareList::new();
        list.upsert("a.txt", "bob", share());
        list.upsert("a.txt", "carol", share());
        list.upsert("b.txt", "dave", share());

        let removed = list.remove("a.txt", "bob").unwrap();
        assert_eq!(removed.recipient, "bob");

        let remaining: Vec<_> = list.for_file("a.txt").map(|e| e.recipient.as_str()).collect();
        assert_eq!(remaining, vec!["carol"]);

        assert!(matches!(
            list.remove("a.txt", "bob"),
            Err(ShareError::EntryNotFound { .. })
        ));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mut list = ShareList::new();
        list.upsert("a.txt", "bob", share());
        let recovered = ShareList::from_bytes(&list.to_bytes().unwrap()).unwrap();
        assert_eq!(recovered, list);
        assert!(ShareList::from_bytes(&ShareList::new().to_bytes().unwrap())
            .unwrap()
            .is_empty());
    }

    proptest! {
        #[test]
        fn prop_at_most_one_entry_per_pair(
            ops in prop::collection::vec((0u8..3, 0u8..3), 0..40)
        ) {
            let mut list = ShareList::new();
            for (file, recipient) in &ops {
                list.upsert(&format!("f{file}"), &format!("u{recipient}"), share());
            }

            let mut pairs: Vec<_> = list.iter().map(|e| (e.filename.clone(), e.recipient.clone())).collect();
            let total = pairs.len();
            pairs.sort();
            pairs.dedup();
            prop_assert_eq!(pairs.len(), total);
        }
    }
}
