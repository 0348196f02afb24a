//! Positional key schedule.
//!
//! A file's two root secrets determine the keys of every node and block by
//! position alone:
//!
//! ```text
//! block keys (i) = (KDF(hash(alpha), i ‖ "encrypt"), KDF(hash(alpha), i ‖ "mac"))
//! node keys  (i) = (KDF(hash(beta),  i ‖ "encrypt"), KDF(hash(beta),  i ‖ "mac"))
//! ```
//!
//! `hash` is BLAKE3 key derivation over the root's encoding and `KDF` is keyed
//! BLAKE3 over the decimal index followed by the purpose. Appending never
//! touches the keys of earlier positions.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use vellum_core::SymmetricKeys;

const NARROW_ROOT_CONTEXT: &str = "vellum-files-v1 narrow root";
const WIDE_ROOT_CONTEXT: &str = "vellum-files-v2 wide root";

/// Width of the root secrets drawn for new files.
///
/// The width travels inside each [`FileHead`](crate::FileHead), so files of
/// either width stay readable whatever new files are configured to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootWidth {
    /// Two 16-bit roots, the reference on-store format.
    #[default]
    Narrow,
    /// Two 256-bit roots.
    Wide,
}

/// The (alpha, beta) root secrets of one file version.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootSecrets {
    Narrow { alpha: u16, beta: u16 },
    Wide { alpha: [u8; 32], beta: [u8; 32] },
}

/// Keys for the node and content block at one position.
#[derive(Debug, Clone)]
pub struct PositionKeys {
    pub block: SymmetricKeys,
    pub node: SymmetricKeys,
}

impl RootSecrets {
    /// Draw fresh roots of the given width.
    pub fn generate(width: RootWidth) -> Self {
        let mut rng = rand::thread_rng();
        match width {
            RootWidth::Narrow => Self::Narrow {
                alpha: rng.gen(),
                beta: rng.gen(),
            },
            RootWidth::Wide => Self::Wide {
                alpha: rng.gen(),
                beta: rng.gen(),
            },
        }
    }

    pub fn width(&self) -> RootWidth {
        match self {
            Self::Narrow { .. } => RootWidth::Narrow,
            Self::Wide { .. } => RootWidth::Wide,
        }
    }

    /// Keys for the node and block at `index`.
    pub fn keys_at(&self, index: u64) -> PositionKeys {
        let (alpha, beta) = match self {
            Self::Narrow { alpha, beta } => (
                blake3::derive_key(NARROW_ROOT_CONTEXT, alpha.to_string().as_bytes()),
                blake3::derive_key(NARROW_ROOT_CONTEXT, beta.to_string().as_bytes()),
            ),
            Self::Wide { alpha, beta } => (
                blake3::derive_key(WIDE_ROOT_CONTEXT, alpha),
                blake3::derive_key(WIDE_ROOT_CONTEXT, beta),
            ),
        };

        PositionKeys {
            block: keys_from_root(&alpha, index),
            node: keys_from_root(&beta, index),
        }
    }
}

impl fmt::Debug for RootSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RootSecrets({:?}, [REDACTED])", self.width())
    }
}

fn keys_from_root(root_hash: &[u8; 32], index: u64) -> SymmetricKeys {
    SymmetricKeys::from_parts(
        kdf(root_hash, index, "encrypt"),
        kdf(root_hash, index, "mac"),
    )
}

fn kdf(root_hash: &[u8; 32], index: u64, purpose: &str) -> [u8; 32] {
    let input = format!("{index}{purpose}");
    *blake3::keyed_hash(root_hash, input.as_bytes()).as_bytes()
}
