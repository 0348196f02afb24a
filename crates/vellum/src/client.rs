//! The Client: unified API for Vellum.
//!
//! The client brings together the blob store, the key directory, the file
//! engine and the sharing records. It holds no per-user state; every
//! operation takes the unlocked [`User`] it acts for.

use std::sync::Arc;

use bytes::Bytes;
use vellum_core::{
    credential, envelope, Ed25519PublicKey, KdfParams, ObjectId, PublicKey, X25519PublicKey,
};
use vellum_files::{FileEngine, HeadLocation, RootWidth};
use vellum_share::{locate, Intermediate, ShareHub, ShareList};
use vellum_store::{BlobStore, KeyDirectory};

use crate::error::{Result, VellumError};
use crate::identity::{encrypt_label, verify_label, IdentityRecord, User};

/// Configuration for the Client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Argon2id cost for credential derivation.
    pub kdf: KdfParams,
    /// Root width for newly stored files.
    pub root_width: RootWidth,
}

/// The main Client struct.
///
/// Provides a unified API for:
/// - Creating and unlocking identities
/// - Storing, appending to, and loading files
/// - Inviting recipients, accepting invitations, and revoking access
pub struct Client<S: BlobStore, D: KeyDirectory> {
    /// The untrusted blob store.
    store: Arc<S>,
    /// The public key directory.
    directory: Arc<D>,
    /// File engine over the same store.
    files: FileEngine<S>,
    /// Configuration.
    config: ClientConfig,
}

impl<S: BlobStore, D: KeyDirectory> Client<S, D> {
    /// Create a new client over the given backends.
    pub fn new(store: Arc<S>, directory: Arc<D>, config: ClientConfig) -> Self {
        Self {
            files: FileEngine::new(Arc::clone(&store), config.root_width),
            store,
            directory,
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the directory reference.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new identity and return it unlocked.
    ///
    /// Fails with `Authorization` if the name is empty or already taken.
    pub async fn create_identity(&self, name: &str, password: &str) -> Result<User> {
        if name.is_empty() {
            return Err(VellumError::Authorization("username must not be empty".into()));
        }

        let location = locate::identity(name);
        if self.store.contains(&location).await? {
            return Err(VellumError::Authorization(format!(
                "identity {name:?} already exists"
            )));
        }

        let credential = credential::derive(name, password, &self.config.kdf)?;
        let signing = vellum_core::Keypair::generate();
        let decryption = vellum_core::X25519StaticSecret::generate();

        self.directory
            .publish(&verify_label(name), PublicKey::Verifying(signing.public_key()))
            .await?;
        self.directory
            .publish(&encrypt_label(name), PublicKey::Encryption(decryption.public_key()))
            .await?;

        let record = IdentityRecord::new(name, &signing, &decryption);
        self.store
            .put(location, Bytes::from(record.seal(&credential)?))
            .await?;

        let user = record.to_user(credential);
        self.write_share_list(&user, &ShareList::new()).await?;

        tracing::info!(user = name, "created identity");
        Ok(user)
    }

    /// Unlock an existing identity.
    ///
    /// An unknown name, a wrong password and a tampered record are
    /// indistinguishable to the caller.
    pub async fn unlock(&self, name: &str, password: &str) -> Result<User> {
        let invalid = || VellumError::Integrity("invalid username or password".into());

        let credential = credential::derive(name, password, &self.config.kdf)?;
        let sealed = self
            .store
            .get(&locate::identity(name))
            .await?
            .ok_or_else(invalid)?;

        let record = IdentityRecord::open(&sealed, &credential).map_err(|_| invalid())?;
        if record.name != name {
            return Err(invalid());
        }

        tracing::debug!(user = name, "unlocked identity");
        Ok(record.to_user(credential))
    }

    /// Invitation locations `user` has issued, oldest first.
    pub async fn issued_invitations(&self, user: &User) -> Result<Vec<ObjectId>> {
        Ok(self.read_identity(user).await?.invitations.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Store `content` under `filename`.
    ///
    /// A new filename becomes a new file owned by `user`. An existing one is
    /// overwritten in place, so everyone it is shared with sees the new
    /// content.
    pub async fn store_file(&self, user: &User, filename: &str, content: &[u8]) -> Result<()> {
        match self.read_intermediate(user, filename).await? {
            Some(intermediate) => {
                let head = self.resolve(&intermediate).await?;
                self.files.create(&head, content).await?;
            }
            None => {
                self.store_fresh(user, filename, content).await?;
            }
        }
        Ok(())
    }

    /// Append `content` to an existing file.
    pub async fn append_file(&self, user: &User, filename: &str, content: &[u8]) -> Result<()> {
        let head = self.resolve_filename(user, filename).await?;
        self.files.append(&head, content).await?;
        Ok(())
    }

    /// Load the full content of a file.
    pub async fn load_file(&self, user: &User, filename: &str) -> Result<Vec<u8>> {
        let head = self.resolve_filename(user, filename).await?;
        self.files.load(&head).await.map_err(|e| {
            tracing::warn!(user = user.name(), filename, error = %e, "file failed to load");
            e.into()
        })
    }

    /// Load whatever file lives at `head`.
    pub(crate) async fn load_at(&self, head: &HeadLocation) -> Result<Vec<u8>> {
        Ok(self.files.load(head).await?)
    }

    /// Store `content` as a new file at a fresh head and point `user`'s
    /// intermediate for `filename` straight at it.
    pub(crate) async fn store_fresh(
        &self,
        user: &User,
        filename: &str,
        content: &[u8],
    ) -> Result<HeadLocation> {
        let head = HeadLocation::generate();
        self.files.create(&head, content).await?;
        self.write_intermediate(user, filename, &Intermediate::Owner { head: head.clone() })
            .await?;
        Ok(head)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Follow `user`'s intermediate for `filename` to the live file head.
    pub(crate) async fn resolve_filename(&self, user: &User, filename: &str) -> Result<HeadLocation> {
        let intermediate = self
            .read_intermediate(user, filename)
            .await?
            .ok_or_else(|| VellumError::NotFound(format!("no file named {filename:?}")))?;
        self.resolve(&intermediate).await
    }

    pub(crate) async fn resolve(&self, intermediate: &Intermediate) -> Result<HeadLocation> {
        match intermediate {
            Intermediate::Owner { head } => Ok(head.clone()),
            Intermediate::Shared { share } => {
                let sealed = self.fetch(share.hub, "share hub").await?;
                Ok(ShareHub::open(&sealed, &share.keys)?.head)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Records sealed to self
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) async fn read_intermediate(
        &self,
        user: &User,
        filename: &str,
    ) -> Result<Option<Intermediate>> {
        let location = locate::intermediate(user.name(), filename);
        match self.store.get(&location).await? {
            Some(sealed) => {
                let plaintext = self.open_own(user, location, &sealed)?;
                Ok(Some(Intermediate::from_bytes(&plaintext)?))
            }
            None => Ok(None),
        }
    }

    pub(crate) async fn write_intermediate(
        &self,
        user: &User,
        filename: &str,
        intermediate: &Intermediate,
    ) -> Result<()> {
        let location = locate::intermediate(user.name(), filename);
        let sealed = self.seal_own(user, location, &intermediate.to_bytes()?)?;
        self.store.put(location, Bytes::from(sealed)).await?;
        Ok(())
    }

    pub(crate) async fn read_share_list(&self, user: &User) -> Result<ShareList> {
        let location = locate::share_list(user.name());
        let sealed = self.fetch(location, "share list").await?;
        Ok(ShareList::from_bytes(&self.open_own(user, location, &sealed)?)?)
    }

    pub(crate) async fn write_share_list(&self, user: &User, list: &ShareList) -> Result<()> {
        let location = locate::share_list(user.name());
        let sealed = self.seal_own(user, location, &list.to_bytes()?)?;
        self.store.put(location, Bytes::from(sealed)).await?;
        Ok(())
    }

    pub(crate) async fn read_identity(&self, user: &User) -> Result<IdentityRecord> {
        let sealed = self.fetch(locate::identity(user.name()), "identity").await?;
        IdentityRecord::open(&sealed, user.credential())
    }

    pub(crate) async fn write_identity(&self, user: &User, record: &IdentityRecord) -> Result<()> {
        self.store
            .put(
                locate::identity(user.name()),
                Bytes::from(record.seal(user.credential())?),
            )
            .await?;
        Ok(())
    }

    /// Seal a record to `user` themself, bound to the location it is stored
    /// at so two of a user's records cannot be swapped.
    fn seal_own(&self, user: &User, location: ObjectId, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut bound = Vec::with_capacity(location.as_bytes().len() + plaintext.len());
        bound.extend_from_slice(location.as_bytes());
        bound.extend_from_slice(plaintext);
        Ok(envelope::sign_then_seal(
            user.signing(),
            &user.encryption_key(),
            &bound,
        )?)
    }

    fn open_own(&self, user: &User, location: ObjectId, sealed: &[u8]) -> Result<Vec<u8>> {
        let mut bound = envelope::verify_then_open(&user.verifying_key(), user.decryption(), sealed)?;
        if !bound.starts_with(location.as_bytes()) {
            return Err(VellumError::Integrity(format!(
                "record does not belong at {location}"
            )));
        }
        Ok(bound.split_off(location.as_bytes().len()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Directory and store helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// `name`'s published signature verification key.
    pub(crate) async fn verifying_key_of(&self, name: &str) -> Result<Ed25519PublicKey> {
        match self.directory.lookup(&verify_label(name)).await? {
            Some(PublicKey::Verifying(key)) => Ok(key),
            Some(PublicKey::Encryption(_)) => Err(VellumError::Malformed(format!(
                "{} holds an encryption key",
                verify_label(name)
            ))),
            None => Err(VellumError::Authorization(format!(
                "{name:?} has no published verification key"
            ))),
        }
    }

    /// `name`'s published sealing key.
    pub(crate) async fn encryption_key_of(&self, name: &str) -> Result<X25519PublicKey> {
        match self.directory.lookup(&encrypt_label(name)).await? {
            Some(PublicKey::Encryption(key)) => Ok(key),
            Some(PublicKey::Verifying(_)) => Err(VellumError::Malformed(format!(
                "{} holds a verification key",
                encrypt_label(name)
            ))),
            None => Err(VellumError::Authorization(format!(
                "{name:?} has no published encryption key"
            ))),
        }
    }

    pub(crate) async fn fetch(&self, id: ObjectId, what: &str) -> Result<Bytes> {
        self.store
            .get(&id)
            .await?
            .ok_or_else(|| VellumError::NotFound(format!("{what} missing at {id}")))
    }

    pub(crate) async fn put(&self, id: ObjectId, value: Vec<u8>) -> Result<()> {
        Ok(self.store.put(id, Bytes::from(value)).await?)
    }
}
