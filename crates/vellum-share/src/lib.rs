//! # Vellum Share
//!
//! Records that let an owner share a file and later revoke one branch of the
//! sharing tree without disturbing the others.
//!
//! ## Key Concepts
//!
//! - **Intermediate**: per-user, per-filename resolver; either the owner's
//!   direct pointer to the file head or an accepted [`Share`]
//! - **ShareHub**: one per (owner, direct recipient, filename); the unit of
//!   revocation
//! - **Share**: the invitation payload, forwarded verbatim on re-share
//! - **ShareList**: the owner's list of direct shares
//!
//! ## Revocation Model
//!
//! Revoking a direct recipient overwrites that recipient's hub with random
//! bytes and moves the file to a fresh head. Sibling hubs are re-pointed at
//! the new head; the revoked hub, and every intermediate downstream of it,
//! can no longer resolve.
//!
//! Record locations are derived in [`locate`].

pub mod error;
pub mod list;
pub mod locate;
pub mod records;

pub use error::{Result, ShareError};
pub use list::{ShareEntry, ShareList};
pub use records::{Intermediate, Share, ShareHub};
