//! Credential derivation: (username, password) → symmetric key pair.
//!
//! Both keys are stretched with Argon2id. The username is folded into the
//! salt through a fixed mask per key, so the two keys never share a salt.
//! Credentials are never stored; they are rederived on every unlock.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroize;

use crate::error::{CoreError, Result};
use crate::keys::{SymmetricKeys, KEY_LEN};

/// Salt mask for the encryption key.
const ENC_MASK: u8 = 0x5c;

/// Salt mask for the authentication key.
const AUTH_MASK: u8 = 0x36;

/// Argon2id cost parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 2)
    pub time_cost: u32,
    /// Parallelism (default: 1)
    pub parallelism: u32,
}

impl KdfParams {
    /// Cheap parameters for tests. Never use for real credentials.
    pub const fn fast() -> Self {
        Self {
            mem_cost_kib: 64,
            time_cost: 1,
            parallelism: 1,
        }
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            mem_cost_kib: Params::DEFAULT_M_COST,
            time_cost: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Derive the credential key pair for a user.
///
/// Pure and deterministic: the same inputs always give the same keys. Total
/// on strings, including the empty username and password.
pub fn derive(username: &str, password: &str, params: &KdfParams) -> Result<SymmetricKeys> {
    let argon2_params = Params::new(
        params.mem_cost_kib,
        params.time_cost,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| CoreError::KeyDerivation(format!("invalid Argon2id params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut enc = [0u8; KEY_LEN];
    let mut auth = [0u8; KEY_LEN];
    stretch(&argon2, password, &masked_salt(username, ENC_MASK), &mut enc)?;
    stretch(&argon2, password, &masked_salt(username, AUTH_MASK), &mut auth)?;

    let keys = SymmetricKeys::from_parts(enc, auth);
    enc.zeroize();
    auth.zeroize();
    Ok(keys)
}

fn stretch(argon2: &Argon2<'_>, password: &str, salt: &[u8], out: &mut [u8; KEY_LEN]) -> Result<()> {
    argon2
        .hash_password_into(password.as_bytes(), salt, out)
        .map_err(|e| CoreError::KeyDerivation(format!("Argon2id KDF failed: {e}")))
}

/// XOR every username byte with `mask`, then hash to a fixed 32-byte salt.
///
/// Argon2 requires at least 8 bytes of salt, which short names cannot supply.
fn masked_salt(username: &str, mask: u8) -> [u8; 32] {
    let masked: Vec<u8> = username.bytes().map(|b| b ^ mask).collect();
    let mut hasher = blake3::Hasher::new_derive_key("vellum-credential-v1 salt");
    hasher.update(&[mask]);
    hasher.update(&masked);
    *hasher.finalize().as_bytes()
}
