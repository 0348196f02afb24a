//! Registering and unlocking identities.

use anyhow::Result;
use vellum::VellumError;
use vellum_testkit::{password_for, TestFixture};

#[tokio::test]
async fn create_then_unlock_recovers_the_same_keys() -> Result<()> {
    let fixture = TestFixture::new();
    let created = fixture.user("alice").await?;
    let unlocked = fixture.client.unlock("alice", &password_for("alice")).await?;

    assert_eq!(unlocked.name(), "alice");
    assert_eq!(unlocked.verifying_key(), created.verifying_key());
    assert_eq!(unlocked.encryption_key(), created.encryption_key());
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_alike() -> Result<()> {
    let fixture = TestFixture::new();
    fixture.user("alice").await?;

    let wrong = fixture.client.unlock("alice", "not-the-password").await;
    let unknown = fixture.client.unlock("mallory", "anything").await;

    match (wrong, unknown) {
        (Err(VellumError::Integrity(a)), Err(VellumError::Integrity(b))) => assert_eq!(a, b),
        other => panic!("expected matching integrity errors, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_identity_is_rejected() -> Result<()> {
    let fixture = TestFixture::new();
    fixture.user("alice").await?;

    let again = fixture.client.create_identity("alice", "other").await;
    assert!(matches!(again, Err(VellumError::Authorization(_))));

    // The original password still works.
    fixture.client.unlock("alice", &password_for("alice")).await?;
    Ok(())
}

#[tokio::test]
async fn empty_username_is_rejected() {
    let fixture = TestFixture::new();
    let result = fixture.client.create_identity("", "password").await;
    assert!(matches!(result, Err(VellumError::Authorization(_))));
}

#[tokio::test]
async fn usernames_are_case_sensitive() -> Result<()> {
    let fixture = TestFixture::new();
    fixture.user("alice").await?;
    fixture.user("Alice").await?;

    assert!(fixture
        .client
        .unlock("Alice", &password_for("alice"))
        .await
        .is_err());
    Ok(())
}

#[tokio::test]
async fn sessions_on_separate_clients_see_each_others_writes() -> Result<()> {
    let fixture = TestFixture::new();
    let laptop = fixture.user("alice").await?;

    let phone_client = fixture.second_client();
    let phone = phone_client.unlock("alice", &password_for("alice")).await?;

    fixture.client.store_file(&laptop, "notes", b"from laptop").await?;
    assert_eq!(phone_client.load_file(&phone, "notes").await?, b"from laptop");

    phone_client.append_file(&phone, "notes", b", and phone").await?;
    assert_eq!(
        fixture.client.load_file(&laptop, "notes").await?,
        b"from laptop, and phone"
    );
    Ok(())
}

#[tokio::test]
async fn issued_invitations_persist_across_sessions() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;
    fixture.user("bob").await?;

    assert!(fixture.client.issued_invitations(&alice).await?.is_empty());

    fixture.client.store_file(&alice, "doc", b"x").await?;
    let first = fixture.client.create_invitation(&alice, "doc", "bob").await?;
    let second = fixture.client.create_invitation(&alice, "doc", "bob").await?;

    let again = fixture.client.unlock("alice", &password_for("alice")).await?;
    assert_eq!(
        fixture.client.issued_invitations(&again).await?,
        vec![first, second]
    );
    Ok(())
}
