//! Storing, appending to, and loading files.

use anyhow::Result;
use proptest::prelude::*;
use vellum::{RootWidth, VellumError, CHUNK_SIZE};
use vellum_testkit::{generators, TestFixture};

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn round_trip_at_chunk_boundaries() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;

    for len in [0, 1, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1, 3 * CHUNK_SIZE] {
        let name = format!("file-{len}");
        let content = pattern(len);
        fixture.client.store_file(&alice, &name, &content).await?;
        assert_eq!(fixture.client.load_file(&alice, &name).await?, content, "len {len}");
    }
    Ok(())
}

#[tokio::test]
async fn round_trip_ten_megabytes() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;
    let content = pattern(10_000_000);

    fixture.client.store_file(&alice, "big", &content).await?;
    let loaded = fixture.client.load_file(&alice, "big").await?;

    assert_eq!(loaded.len(), content.len());
    assert!(loaded == content);
    Ok(())
}

#[tokio::test]
async fn round_trip_with_wide_roots() -> Result<()> {
    let fixture = TestFixture::with_width(RootWidth::Wide);
    let alice = fixture.user("alice").await?;
    let content = pattern(5 * CHUNK_SIZE + 17);

    fixture.client.store_file(&alice, "wide", &content).await?;
    fixture.client.append_file(&alice, "wide", b"tail").await?;

    // A client defaulting to narrow roots still reads it.
    let narrow = fixture.second_client();
    let mut expected = content.clone();
    expected.extend_from_slice(b"tail");
    assert_eq!(narrow.load_file(&alice, "wide").await?, expected);
    Ok(())
}

#[tokio::test]
async fn appends_concatenate_in_order() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;

    fixture.client.store_file(&alice, "log", b"one").await?;
    fixture.client.append_file(&alice, "log", &pattern(CHUNK_SIZE)).await?;
    fixture.client.append_file(&alice, "log", b"").await?;
    fixture.client.append_file(&alice, "log", b"three").await?;

    let mut expected = b"one".to_vec();
    expected.extend(pattern(CHUNK_SIZE));
    expected.extend_from_slice(b"three");
    assert_eq!(fixture.client.load_file(&alice, "log").await?, expected);
    Ok(())
}

#[tokio::test]
async fn append_to_empty_file() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;

    fixture.client.store_file(&alice, "empty", b"").await?;
    assert!(fixture.client.load_file(&alice, "empty").await?.is_empty());

    fixture.client.append_file(&alice, "empty", b"now").await?;
    assert_eq!(fixture.client.load_file(&alice, "empty").await?, b"now");
    Ok(())
}

#[tokio::test]
async fn store_overwrites_existing_file() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;

    fixture.client.store_file(&alice, "doc", &pattern(4 * CHUNK_SIZE)).await?;
    fixture.client.store_file(&alice, "doc", b"short").await?;
    assert_eq!(fixture.client.load_file(&alice, "doc").await?, b"short");
    Ok(())
}

#[tokio::test]
async fn filenames_are_per_user() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;
    let bob = fixture.user("bob").await?;

    fixture.client.store_file(&alice, "doc", b"alice's").await?;
    fixture.client.store_file(&bob, "doc", b"bob's").await?;

    assert_eq!(fixture.client.load_file(&alice, "doc").await?, b"alice's");
    assert_eq!(fixture.client.load_file(&bob, "doc").await?, b"bob's");
    Ok(())
}

#[tokio::test]
async fn unknown_filename_is_not_found() -> Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice").await?;

    assert!(matches!(
        fixture.client.load_file(&alice, "nope").await,
        Err(VellumError::NotFound(_))
    ));
    assert!(matches!(
        fixture.client.append_file(&alice, "nope", b"x").await,
        Err(VellumError::NotFound(_))
    ));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_store_append_load(
        first in generators::content(4),
        second in generators::content(2),
        name in generators::filename(),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let loaded = runtime.block_on(async {
            let fixture = TestFixture::new();
            let alice = fixture.user("alice").await?;
            fixture.client.store_file(&alice, &name, &first).await?;
            fixture.client.append_file(&alice, &name, &second).await?;
            fixture.client.load_file(&alice, &name).await
        }).unwrap();

        let mut expected = first.clone();
        expected.extend_from_slice(&second);
        prop_assert_eq!(loaded, expected);
    }
}
