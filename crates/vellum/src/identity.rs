//! Identities and unlocked users.
//!
//! An identity record holds a user's private keys and the invitations they
//! issued. It is sealed under the user's credential, so only someone who
//! knows the password can open it. The public halves of the keys live in the
//! directory under `<name>/verify` and `<name>/encrypt`.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

use vellum_core::{
    codec, envelope, Ed25519PublicKey, Keypair, ObjectId, SymmetricKeys, X25519PublicKey,
    X25519StaticSecret,
};

use crate::error::Result;

/// Directory label for `name`'s signature verification key.
pub fn verify_label(name: &str) -> String {
    format!("{name}/verify")
}

/// Directory label for `name`'s sealing key.
pub fn encrypt_label(name: &str) -> String {
    format!("{name}/encrypt")
}

/// The persisted identity, sealed under the credential.
#[derive(Serialize, Deserialize)]
pub(crate) struct IdentityRecord {
    pub name: String,
    signing_seed: [u8; 32],
    decryption_secret: [u8; 32],
    /// Invitation locations this user has issued, oldest first.
    pub invitations: Vec<ObjectId>,
}

impl IdentityRecord {
    pub fn new(name: &str, signing: &Keypair, decryption: &X25519StaticSecret) -> Self {
        Self {
            name: name.to_string(),
            signing_seed: signing.seed(),
            decryption_secret: decryption.to_bytes(),
            invitations: Vec::new(),
        }
    }

    pub fn seal(&self, credential: &SymmetricKeys) -> Result<Vec<u8>> {
        Ok(envelope::seal(&codec::to_bytes(self)?, credential)?)
    }

    pub fn open(sealed: &[u8], credential: &SymmetricKeys) -> Result<Self> {
        let plaintext = envelope::authenticate_then_decrypt(sealed, credential)?;
        Ok(codec::from_bytes(&plaintext)?)
    }

    pub fn to_user(&self, credential: SymmetricKeys) -> User {
        User {
            name: self.name.clone(),
            credential,
            signing: Keypair::from_seed(&self.signing_seed),
            decryption: X25519StaticSecret::from_bytes(self.decryption_secret),
        }
    }
}

impl Drop for IdentityRecord {
    fn drop(&mut self) {
        self.signing_seed.zeroize();
        self.decryption_secret.zeroize();
    }
}

/// An unlocked user.
///
/// A plain value: holding one is the only session state there is. Any
/// number of `User`s for the same identity may exist at once, on any
/// number of clients; each operation re-reads what it needs from the store.
#[derive(Clone)]
pub struct User {
    name: String,
    credential: SymmetricKeys,
    signing: Keypair,
    decryption: X25519StaticSecret,
}

impl User {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verifying_key(&self) -> Ed25519PublicKey {
        self.signing.public_key()
    }

    pub fn encryption_key(&self) -> X25519PublicKey {
        self.decryption.public_key()
    }

    pub(crate) fn credential(&self) -> &SymmetricKeys {
        &self.credential
    }

    pub(crate) fn signing(&self) -> &Keypair {
        &self.signing
    }

    pub(crate) fn decryption(&self) -> &X25519StaticSecret {
        &self.decryption
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("verifying_key", &self.verifying_key())
            .finish_non_exhaustive()
    }
}
