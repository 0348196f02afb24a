//! # Vellum Testkit
//!
//! Testing utilities for Vellum.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a client over in-memory backends with cheap key
//!   derivation, plus helpers for registering users and tampering with the
//!   store
//! - **Generators**: Proptest strategies for names and file contents
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use vellum_testkit::TestFixture;
//!
//! async fn example() -> vellum::Result<()> {
//!     let fixture = TestFixture::new();
//!     let alice = fixture.user("alice").await?;
//!     fixture.client.store_file(&alice, "a.txt", b"hello").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use vellum_testkit::generators::content;
//!
//! proptest! {
//!     #[test]
//!     fn chunking_is_lossless(bytes in content(4)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{init_tracing, password_for, TestFixture};
pub use generators::{boundary_len, content, filename, username};
