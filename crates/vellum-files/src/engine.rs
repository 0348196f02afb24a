//! The file engine: store, append, and load over a [`BlobStore`].
//!
//! The engine only ever sees a [`HeadLocation`]; resolving a filename to one
//! is the caller's business.

use std::sync::Arc;

use bytes::Bytes;
use vellum_core::{envelope, ObjectId};
use vellum_store::BlobStore;

use crate::error::{FilesError, Result};
use crate::records::{FileBody, FileHead, HeadLocation};
use crate::schedule::{RootSecrets, RootWidth};

/// Maximum bytes per content block.
pub const CHUNK_SIZE: usize = 256;

/// Stores files as chains of positionally keyed nodes.
pub struct FileEngine<S: BlobStore + ?Sized> {
    store: Arc<S>,
    width: RootWidth,
}

impl<S: BlobStore + ?Sized> Clone for FileEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            width: self.width,
        }
    }
}

impl<S: BlobStore + ?Sized> FileEngine<S> {
    /// Create an engine whose new files use roots of `width`.
    pub fn new(store: Arc<S>, width: RootWidth) -> Self {
        Self { store, width }
    }

    /// Write `content` as a brand-new file version at `at`.
    ///
    /// Fresh roots are drawn every time. Whatever head previously lived at
    /// `at` is replaced; its nodes become unreachable.
    pub async fn create(&self, at: &HeadLocation, content: &[u8]) -> Result<FileHead> {
        let chunks = split(content);
        let ids: Vec<ObjectId> = chunks.iter().map(|_| ObjectId::random()).collect();
        let roots = RootSecrets::generate(self.width);

        self.write_nodes(&roots, 0, &chunks, &ids).await?;

        let head = FileHead {
            roots,
            first: ids[0],
            last: ids[ids.len() - 1],
            length: ids.len() as u64,
        };
        self.write_head(at, &head).await?;

        tracing::debug!(head = %at.id, nodes = head.length, bytes = content.len(), "stored file");
        Ok(head)
    }

    /// Append `content` to the file whose head lives at `at`.
    ///
    /// Only the previous last node is rewritten; every earlier node and block
    /// is left untouched.
    pub async fn append(&self, at: &HeadLocation, content: &[u8]) -> Result<FileHead> {
        let mut head = self.read_head(at).await?;
        if content.is_empty() {
            return Ok(head);
        }

        let chunks: Vec<&[u8]> = content.chunks(CHUNK_SIZE).collect();
        let ids: Vec<ObjectId> = chunks.iter().map(|_| ObjectId::random()).collect();

        self.write_nodes(&head.roots, head.length, &chunks, &ids)
            .await?;

        // Link the old tail to the first new node.
        let tail_keys = head.roots.keys_at(head.length - 1).node;
        let sealed = self.fetch(head.last, "file node").await?;
        let mut tail = FileBody::open(&sealed, &tail_keys)?;
        tail.next = Some(ids[0]);
        self.store
            .put(head.last, Bytes::from(tail.seal(&tail_keys)?))
            .await?;

        head.last = ids[ids.len() - 1];
        head.length += ids.len() as u64;
        self.write_head(at, &head).await?;

        tracing::debug!(head = %at.id, nodes = head.length, appended = content.len(), "appended to file");
        Ok(head)
    }

    /// Read back the full content of the file at `at`.
    ///
    /// Walks exactly `length` nodes. Nothing is returned unless every node and
    /// block authenticates.
    pub async fn load(&self, at: &HeadLocation) -> Result<Vec<u8>> {
        let head = self.read_head(at).await?;

        let mut content = Vec::new();
        let mut cursor = Some(head.first);
        for index in 0..head.length {
            let node_id = cursor.ok_or(FilesError::BrokenChain {
                reached: index,
                length: head.length,
            })?;
            let keys = head.roots.keys_at(index);

            let node = FileBody::open(&self.fetch(node_id, "file node").await?, &keys.node)?;
            let block = self.fetch(node.block, "content block").await?;
            content.extend_from_slice(&envelope::authenticate_then_decrypt(&block, &keys.block)?);

            cursor = node.next;
        }

        Ok(content)
    }

    /// Fetch and authenticate the head at `at`.
    pub async fn read_head(&self, at: &HeadLocation) -> Result<FileHead> {
        let sealed = self.fetch(at.id, "file head").await?;
        let head = FileHead::open(&sealed, &at.keys)?;
        if head.length == 0 {
            return Err(FilesError::MalformedHead("zero-length chain".into()));
        }
        Ok(head)
    }

    async fn write_head(&self, at: &HeadLocation, head: &FileHead) -> Result<()> {
        self.store
            .put(at.id, Bytes::from(head.seal(&at.keys)?))
            .await?;
        Ok(())
    }

    /// Write one block and one node per chunk, starting at position `start`.
    ///
    /// `ids[i]` is the node id for `chunks[i]`; each node links to the next id
    /// and the final one has no successor.
    async fn write_nodes(
        &self,
        roots: &RootSecrets,
        start: u64,
        chunks: &[&[u8]],
        ids: &[ObjectId],
    ) -> Result<()> {
        for (offset, (chunk, node_id)) in chunks.iter().zip(ids).enumerate() {
            let keys = roots.keys_at(start + offset as u64);

            let block_id = ObjectId::random();
            self.store
                .put(block_id, Bytes::from(envelope::seal(chunk, &keys.block)?))
                .await?;

            let node = FileBody {
                block: block_id,
                next: ids.get(offset + 1).copied(),
            };
            self.store
                .put(*node_id, Bytes::from(node.seal(&keys.node)?))
                .await?;
        }
        Ok(())
    }

    async fn fetch(&self, id: ObjectId, what: &'static str) -> Result<Bytes> {
        self.store
            .get(&id)
            .await?
            .ok_or(FilesError::Missing { what, id })
    }
}

/// Split content into blocks; empty content is a single empty block.
fn split(content: &[u8]) -> Vec<&[u8]> {
    if content.is_empty() {
        vec![content]
    } else {
        content.chunks(CHUNK_SIZE).collect()
    }
}
