//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use bytes::Bytes;
use rand::Rng;

use vellum::{Client, ClientConfig, KdfParams, RootWidth, User};
use vellum_core::ObjectId;
use vellum_store::{BlobStore, MemoryDirectory, MemoryStore};

/// A client over a fresh in-memory store and directory.
///
/// Key derivation uses [`KdfParams::fast`] so tests can register many users.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub directory: Arc<MemoryDirectory>,
    pub client: Client<MemoryStore, MemoryDirectory>,
}

impl TestFixture {
    /// Create a new fixture with narrow file roots.
    pub fn new() -> Self {
        Self::with_width(RootWidth::Narrow)
    }

    /// Create a new fixture storing files with the given root width.
    pub fn with_width(root_width: RootWidth) -> Self {
        let store = Arc::new(MemoryStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let client = Self::client_over(&store, &directory, root_width);
        Self {
            store,
            directory,
            client,
        }
    }

    /// A second, independent client over the same backends.
    ///
    /// Models another device of the same deployment.
    pub fn second_client(&self) -> Client<MemoryStore, MemoryDirectory> {
        Self::client_over(&self.store, &self.directory, RootWidth::Narrow)
    }

    /// Register `name` with the password from [`password_for`].
    pub async fn user(&self, name: &str) -> vellum::Result<User> {
        self.client.create_identity(name, &password_for(name)).await
    }

    /// Register every name in order.
    pub async fn users(&self, names: &[&str]) -> vellum::Result<Vec<User>> {
        let mut users = Vec::with_capacity(names.len());
        for name in names {
            users.push(self.user(name).await?);
        }
        Ok(users)
    }

    /// Every object id currently in the store.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.store.ids().unwrap_or_default()
    }

    /// Flip one bit of the object at `id`. Returns the original bytes.
    pub async fn flip_bit(&self, id: ObjectId, index: usize) -> Option<Bytes> {
        let original = self.store.get(&id).await.ok().flatten()?;
        if original.is_empty() {
            return None;
        }
        let mut tampered = original.to_vec();
        let at = index % tampered.len();
        tampered[at] ^= 0x01;
        self.store.put(id, Bytes::from(tampered)).await.ok()?;
        Some(original)
    }

    /// Replace the object at `id` with random bytes of the same length.
    pub async fn scramble(&self, id: ObjectId) -> Option<Bytes> {
        let original = self.store.get(&id).await.ok().flatten()?;
        let mut noise = vec![0u8; original.len()];
        rand::thread_rng().fill(&mut noise[..]);
        self.store.put(id, Bytes::from(noise)).await.ok()?;
        Some(original)
    }

    /// Put `value` back at `id`.
    pub async fn restore(&self, id: ObjectId, value: Bytes) {
        let _ = self.store.put(id, value).await;
    }

    /// Every stored object with its current value.
    pub async fn snapshot(&self) -> Vec<(ObjectId, Bytes)> {
        let mut objects = Vec::new();
        for id in self.object_ids() {
            if let Ok(Some(value)) = self.store.get(&id).await {
                objects.push((id, value));
            }
        }
        objects
    }

    /// Put every object in `snapshot` back. Objects written since are kept.
    pub async fn restore_snapshot(&self, snapshot: &[(ObjectId, Bytes)]) {
        for (id, value) in snapshot {
            self.restore(*id, value.clone()).await;
        }
    }

    fn client_over(
        store: &Arc<MemoryStore>,
        directory: &Arc<MemoryDirectory>,
        root_width: RootWidth,
    ) -> Client<MemoryStore, MemoryDirectory> {
        Client::new(
            Arc::clone(store),
            Arc::clone(directory),
            ClientConfig {
                kdf: KdfParams::fast(),
                root_width,
            },
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The password [`TestFixture::user`] registers `name` with.
pub fn password_for(name: &str) -> String {
    format!("{name}-password")
}

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_registers_users() {
        let fixture = TestFixture::new();
        let users = fixture.users(&["alice", "bob"]).await.unwrap();

        assert_eq!(users[0].name(), "alice");
        assert_ne!(users[0].verifying_key(), users[1].verifying_key());
        assert!(!fixture.object_ids().is_empty());
    }

    #[tokio::test]
    async fn test_flip_bit_and_restore() {
        let fixture = TestFixture::new();
        let id = ObjectId::random();
        fixture.store.put(id, Bytes::from_static(b"abc")).await.unwrap();

        let original = fixture.flip_bit(id, 4).await.unwrap();
        assert_eq!(&original[..], b"abc");
        assert_eq!(&fixture.store.get(&id).await.unwrap().unwrap()[..], b"acc");

        fixture.restore(id, original).await;
        assert_eq!(&fixture.store.get(&id).await.unwrap().unwrap()[..], b"abc");
    }

    #[tokio::test]
    async fn test_flip_bit_on_missing_object() {
        let fixture = TestFixture::new();
        assert!(fixture.flip_bit(ObjectId::random(), 0).await.is_none());
    }
}
