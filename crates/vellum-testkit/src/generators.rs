//! Proptest generators for property-based testing.

use proptest::prelude::*;

use vellum::CHUNK_SIZE;

/// A plausible, non-empty username.
pub fn username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_map(String::from)
}

/// A filename, including separators and dots.
pub fn filename() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./ -]{1,40}".prop_map(String::from)
}

/// A length within one byte of a multiple of [`CHUNK_SIZE`], up to
/// `max_chunks` chunks.
pub fn boundary_len(max_chunks: usize) -> impl Strategy<Value = usize> {
    (0..=max_chunks, -1i64..=1).prop_map(|(chunks, offset)| {
        let len = (chunks * CHUNK_SIZE) as i64 + offset;
        len.max(0) as usize
    })
}

/// File content spanning up to `max_chunks` chunks, biased toward chunk
/// boundaries.
pub fn content(max_chunks: usize) -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        boundary_len(max_chunks),
        0..=max_chunks * CHUNK_SIZE,
    ]
    .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}
