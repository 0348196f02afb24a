//! The full flow over the SQLite backend.

use std::sync::Arc;

use anyhow::Result;
use vellum::store::SqliteStore;
use vellum::{Client, ClientConfig, KdfParams, RootWidth, VellumError, CHUNK_SIZE};
use vellum_testkit::init_tracing;

fn client_over(store: &SqliteStore) -> Client<SqliteStore, SqliteStore> {
    let shared = Arc::new(store.clone());
    Client::new(
        Arc::clone(&shared),
        shared,
        ClientConfig {
            kdf: KdfParams::fast(),
            root_width: RootWidth::Narrow,
        },
    )
}

#[tokio::test]
async fn share_and_revoke_over_sqlite() -> Result<()> {
    init_tracing();
    let client = client_over(&SqliteStore::open_memory()?);

    let alice = client.create_identity("alice", "pw-a").await?;
    let bob = client.create_identity("bob", "pw-b").await?;
    let carol = client.create_identity("carol", "pw-c").await?;

    let content: Vec<u8> = (0..3 * CHUNK_SIZE + 1).map(|i| i as u8).collect();
    client.store_file(&alice, "doc", &content).await?;

    for user in [&bob, &carol] {
        let invitation = client.create_invitation(&alice, "doc", user.name()).await?;
        client
            .accept_invitation(user, "alice", invitation, "doc")
            .await?;
        assert_eq!(client.load_file(user, "doc").await?, content);
    }

    client.revoke_access(&alice, "doc", "bob").await?;
    assert!(matches!(
        client.load_file(&bob, "doc").await,
        Err(VellumError::Integrity(_))
    ));
    assert_eq!(client.load_file(&carol, "doc").await?, content);
    Ok(())
}

#[tokio::test]
async fn identities_and_files_survive_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("vellum.db");

    {
        let client = client_over(&SqliteStore::open(&path)?);
        let alice = client.create_identity("alice", "hunter2").await?;
        client.store_file(&alice, "notes", b"persisted").await?;
    }

    let client = client_over(&SqliteStore::open(&path)?);
    let alice = client.unlock("alice", "hunter2").await?;
    client.append_file(&alice, "notes", b" and appended").await?;
    assert_eq!(
        client.load_file(&alice, "notes").await?,
        b"persisted and appended"
    );

    assert!(matches!(
        client.create_identity("alice", "other").await,
        Err(VellumError::Authorization(_))
    ));
    Ok(())
}
