//! Authenticated envelopes.
//!
//! Two wrappings protect everything written to the untrusted store:
//!
//! - **Symmetric** (encrypt-then-authenticate): `tag ‖ iv ‖ ciphertext`,
//!   where `tag = keyed BLAKE3(auth key, iv ‖ ciphertext)`. The tag is checked
//!   in constant time before any decryption is attempted.
//! - **Sealed** (sign-then-seal): `signature ‖ wrapped key ‖ ciphertext`. A
//!   fresh content key encrypts the payload and is wrapped to the recipient
//!   with ephemeral X25519; the sender signs `wrapped key ‖ ciphertext`.
//!   Opening verifies the signature before touching the ciphertext.

use crate::crypto::{Ed25519PublicKey, Ed25519Signature, Keypair, SIGNATURE_LEN};
use crate::error::{CoreError, Result};
use crate::keys::{
    EncryptionKey, EncryptionNonce, EphemeralKeyPair, SymmetricKeys, X25519PublicKey,
    X25519StaticSecret, KEY_LEN, NONCE_LEN,
};

/// Length of the keyed BLAKE3 tag.
pub const TAG_LEN: usize = 32;

/// Poly1305 tag appended by the AEAD.
const AEAD_TAG_LEN: usize = 16;

/// `ephemeral public ‖ nonce ‖ encrypted content key`.
pub const WRAPPED_KEY_LEN: usize = 32 + NONCE_LEN + KEY_LEN + AEAD_TAG_LEN;

/// Seal `plaintext` under `keys` with an explicit IV.
pub fn encrypt_then_authenticate(
    plaintext: &[u8],
    keys: &SymmetricKeys,
    iv: &EncryptionNonce,
) -> Result<Vec<u8>> {
    let ciphertext = keys.encryption_key().encrypt(plaintext, iv)?;

    let mut out = Vec::with_capacity(TAG_LEN + NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&[0u8; TAG_LEN]);
    out.extend_from_slice(iv.as_bytes());
    out.extend_from_slice(&ciphertext);

    let tag = blake3::keyed_hash(keys.auth_key(), &out[TAG_LEN..]);
    out[..TAG_LEN].copy_from_slice(tag.as_bytes());
    Ok(out)
}

/// Seal `plaintext` under `keys` with a fresh random IV.
pub fn seal(plaintext: &[u8], keys: &SymmetricKeys) -> Result<Vec<u8>> {
    encrypt_then_authenticate(plaintext, keys, &EncryptionNonce::generate())
}

/// Check the tag, then decrypt. Any failure is an integrity error.
pub fn authenticate_then_decrypt(sealed: &[u8], keys: &SymmetricKeys) -> Result<Vec<u8>> {
    if sealed.len() < TAG_LEN + NONCE_LEN + AEAD_TAG_LEN {
        return Err(CoreError::Integrity(format!(
            "envelope too short: {} bytes",
            sealed.len()
        )));
    }

    let (tag, body) = sealed.split_at(TAG_LEN);
    let mut claimed = [0u8; TAG_LEN];
    claimed.copy_from_slice(tag);
    // blake3::Hash equality is constant time.
    if blake3::keyed_hash(keys.auth_key(), body) != blake3::Hash::from(claimed) {
        return Err(CoreError::Integrity("authentication tag mismatch".into()));
    }

    let (iv, ciphertext) = body.split_at(NONCE_LEN);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(iv);
    keys.encryption_key()
        .decrypt(ciphertext, &EncryptionNonce::from_bytes(nonce))
}

/// Sign and seal `plaintext` from `sender` to the holder of `recipient`.
pub fn sign_then_seal(
    sender: &Keypair,
    recipient: &X25519PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let content_key = EncryptionKey::generate();
    let nonce = EncryptionNonce::generate();
    let ciphertext = content_key.encrypt(plaintext, &nonce)?;

    let wrapped = wrap_key(&content_key, recipient)?;

    let mut out =
        Vec::with_capacity(SIGNATURE_LEN + WRAPPED_KEY_LEN + NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&[0u8; SIGNATURE_LEN]);
    out.extend_from_slice(&wrapped);
    out.extend_from_slice(nonce.as_bytes());
    out.extend_from_slice(&ciphertext);

    let signature = sender.sign(&out[SIGNATURE_LEN..]);
    out[..SIGNATURE_LEN].copy_from_slice(signature.as_bytes());
    Ok(out)
}

/// Verify `sender`'s signature, then unwrap and decrypt with `recipient`.
///
/// Signature failures (including input too short to hold one) are
/// verification errors; everything after a good signature is an integrity
/// error.
pub fn verify_then_open(
    sender: &Ed25519PublicKey,
    recipient: &X25519StaticSecret,
    sealed: &[u8],
) -> Result<Vec<u8>> {
    if sealed.len() < SIGNATURE_LEN {
        return Err(CoreError::Verification);
    }
    let (signature, body) = sealed.split_at(SIGNATURE_LEN);
    sender.verify(body, &Ed25519Signature::try_from(signature)?)?;

    if body.len() < WRAPPED_KEY_LEN + NONCE_LEN + AEAD_TAG_LEN {
        return Err(CoreError::Integrity(format!(
            "sealed body too short: {} bytes",
            body.len()
        )));
    }
    let (wrapped, rest) = body.split_at(WRAPPED_KEY_LEN);
    let content_key = unwrap_key(wrapped, recipient)?;

    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
    let mut iv = [0u8; NONCE_LEN];
    iv.copy_from_slice(nonce);
    content_key.decrypt(ciphertext, &EncryptionNonce::from_bytes(iv))
}

/// Wrap `content_key` to `recipient` with a one-time ephemeral key.
fn wrap_key(content_key: &EncryptionKey, recipient: &X25519PublicKey) -> Result<Vec<u8>> {
    let ephemeral = EphemeralKeyPair::generate();
    let ephemeral_public = ephemeral.public_key();
    let shared = ephemeral.diffie_hellman(recipient);
    let wrap_key = shared.derive_encryption_key(&wrap_context(&ephemeral_public, recipient));

    let nonce = EncryptionNonce::generate();
    let encrypted_key = wrap_key.encrypt(content_key.as_bytes(), &nonce)?;

    let mut out = Vec::with_capacity(WRAPPED_KEY_LEN);
    out.extend_from_slice(ephemeral_public.as_bytes());
    out.extend_from_slice(nonce.as_bytes());
    out.extend_from_slice(&encrypted_key);
    Ok(out)
}

fn unwrap_key(wrapped: &[u8], recipient: &X25519StaticSecret) -> Result<EncryptionKey> {
    let (ephemeral, rest) = wrapped.split_at(32);
    let (nonce, encrypted_key) = rest.split_at(NONCE_LEN);

    let mut ephemeral_bytes = [0u8; 32];
    ephemeral_bytes.copy_from_slice(ephemeral);
    let ephemeral_public = X25519PublicKey::from_bytes(ephemeral_bytes);
    let mut iv = [0u8; NONCE_LEN];
    iv.copy_from_slice(nonce);

    let shared = recipient.diffie_hellman(&ephemeral_public);
    let wrap_key =
        shared.derive_encryption_key(&wrap_context(&ephemeral_public, &recipient.public_key()));
    let key_bytes = wrap_key.decrypt(encrypted_key, &EncryptionNonce::from_bytes(iv))?;

    let key: [u8; KEY_LEN] = key_bytes.as_slice().try_into().map_err(|_| {
        CoreError::Integrity(format!("invalid key length: {}", key_bytes.len()))
    })?;
    Ok(EncryptionKey::from_bytes(key))
}

fn wrap_context(ephemeral: &X25519PublicKey, recipient: &X25519PublicKey) -> [u8; 64] {
    let mut context = [0u8; 64];
    context[..32].copy_from_slice(ephemeral.as_bytes());
    context[32..].copy_from_slice(recipient.as_bytes());
    context
}
