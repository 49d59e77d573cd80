//! In-memory document source and chunk store.
//!
//! A zero-dependency backend holding documents and chunks in `HashMap`s
//! behind `tokio::sync::RwLock`. Suitable for development and tests; the
//! whole-map write lock gives `replace` the same all-or-nothing visibility
//! the Postgres store gets from a transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{Chunk, Document, DocumentStatus, NewChunk};
use crate::error::Result;
use crate::store::{ChunkStore, DocumentSource};

/// An in-memory [`DocumentSource`] and [`ChunkStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: RwLock<Vec<Document>>,
    chunks: RwLock<HashMap<Uuid, Vec<Chunk>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document to the source side of the store.
    pub async fn push_document(&self, document: Document) {
        self.documents.write().await.push(document);
    }

    /// The persisted chunks for a document, in position order.
    pub async fn chunks_for(&self, document_id: Uuid) -> Vec<Chunk> {
        self.chunks.read().await.get(&document_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DocumentSource for InMemoryStore {
    async fn completed_with_payload(&self) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| d.status == DocumentStatus::Completed && d.extraction.is_some())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ChunkStore for InMemoryStore {
    async fn count(&self, document_id: Uuid) -> Result<u64> {
        let chunks = self.chunks.read().await;
        Ok(chunks.get(&document_id).map(|c| c.len() as u64).unwrap_or(0))
    }

    async fn replace(&self, document_id: Uuid, chunks: &[NewChunk]) -> Result<()> {
        let now = Utc::now();
        let records: Vec<Chunk> = chunks
            .iter()
            .enumerate()
            .map(|(position, chunk)| Chunk {
                id: Uuid::new_v4(),
                document_id,
                content: chunk.content.clone(),
                position,
                token_count: chunk.token_count,
                embedding: chunk.embedding.clone(),
                created_at: now,
            })
            .collect();

        // Single insert under the write lock: the old set is swapped for the
        // new one in one step, empty input included.
        self.chunks.write().await.insert(document_id, records);
        Ok(())
    }
}
