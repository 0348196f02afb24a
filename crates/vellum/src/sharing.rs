//! Invitations, acceptance, and revocation.

use vellum_core::{envelope, ObjectId, SymmetricKeys};
use vellum_share::{locate, Intermediate, Share, ShareHub};
use vellum_store::{BlobStore, KeyDirectory};

use crate::client::Client;
use crate::error::{Result, VellumError};
use crate::identity::User;

impl<S: BlobStore, D: KeyDirectory> Client<S, D> {
    /// Invite `recipient` to `filename` and return where the invitation lives.
    ///
    /// Owners hand out (or re-seal) the hub for `recipient`; anyone else
    /// forwards the share they accepted, so revoking their inviter also cuts
    /// off everyone they invited.
    pub async fn create_invitation(
        &self,
        user: &User,
        filename: &str,
        recipient: &str,
    ) -> Result<ObjectId> {
        let intermediate = self
            .read_intermediate(user, filename)
            .await?
            .ok_or_else(|| VellumError::NotFound(format!("no file named {filename:?}")))?;
        let recipient_key = self.encryption_key_of(recipient).await?;

        let share = match intermediate {
            Intermediate::Owner { head } => {
                let mut list = self.read_share_list(user).await?;
                let share = match list.find(filename, recipient) {
                    Some(existing) => existing.clone(),
                    None => Share::new(
                        locate::share_hub(user.name(), recipient, filename),
                        SymmetricKeys::generate(),
                    ),
                };

                self.put(share.hub, ShareHub::new(head).seal(&share.keys)?)
                    .await?;
                list.upsert(filename, recipient, share.clone());
                self.write_share_list(user, &list).await?;
                share
            }
            Intermediate::Shared { share } => share,
        };

        let sealed = envelope::sign_then_seal(user.signing(), &recipient_key, &share.to_bytes()?)?;
        let invitation = ObjectId::random();
        self.put(invitation, sealed).await?;

        let mut record = self.read_identity(user).await?;
        record.invitations.push(invitation);
        self.write_identity(user, &record).await?;

        tracing::info!(user = user.name(), filename, recipient, %invitation, "created invitation");
        Ok(invitation)
    }

    /// Accept the invitation `sender` left at `invitation`, filing it under
    /// `filename`.
    ///
    /// Fails with `Authorization` rather than replace a file `user` already
    /// has under that name.
    pub async fn accept_invitation(
        &self,
        user: &User,
        sender: &str,
        invitation: ObjectId,
        filename: &str,
    ) -> Result<()> {
        let sealed = self.fetch(invitation, "invitation").await?;
        let sender_key = self.verifying_key_of(sender).await?;
        let payload = envelope::verify_then_open(&sender_key, user.decryption(), &sealed)
            .map_err(|e| {
                tracing::warn!(user = user.name(), sender, %invitation, error = %e, "rejected invitation");
                VellumError::from(e)
            })?;
        let share = Share::from_bytes(&payload)?;

        if self.read_intermediate(user, filename).await?.is_some() {
            return Err(VellumError::Authorization(format!(
                "{filename:?} is already in use"
            )));
        }

        self.write_intermediate(user, filename, &Intermediate::Shared { share })
            .await?;

        tracing::info!(user = user.name(), sender, filename, "accepted invitation");
        Ok(())
    }

    /// Cut `recipient`, and everyone they shared with, off from `filename`.
    ///
    /// The file moves to a fresh head with fresh roots. Every other direct
    /// recipient's hub is re-pointed at it, so their subtrees keep access.
    pub async fn revoke_access(&self, user: &User, filename: &str, recipient: &str) -> Result<()> {
        let intermediate = self
            .read_intermediate(user, filename)
            .await?
            .ok_or_else(|| VellumError::NotFound(format!("no file named {filename:?}")))?;
        let Intermediate::Owner { head } = intermediate else {
            return Err(VellumError::Authorization(format!(
                "only the owner may revoke access to {filename:?}"
            )));
        };

        let content = self.load_at(&head).await?;

        let mut list = self.read_share_list(user).await?;
        let revoked = list.remove(filename, recipient)?;

        self.put(revoked.share.hub, ShareHub::revoked_placeholder())
            .await?;

        let new_head = self.store_fresh(user, filename, &content).await?;

        // Remaining hubs all carry the owner's new head keys.
        for entry in list.for_file(filename) {
            self.put(
                entry.share.hub,
                ShareHub::new(new_head.clone()).seal(&entry.share.keys)?,
            )
            .await?;
        }

        self.write_share_list(user, &list).await?;

        tracing::warn!(user = user.name(), filename, recipient, "revoked access");
        Ok(())
    }
}
