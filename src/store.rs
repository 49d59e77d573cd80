//! Storage capability traits for documents and chunks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::document::{Document, NewChunk};
use crate::error::Result;

/// Read access to the upstream document table.
///
/// Documents are owned by the surrounding system; this crate only lists the
/// ones eligible for ingestion. A failure here is an
/// [`IngestError::Orchestration`](crate::IngestError::Orchestration) and
/// aborts the whole batch, unlike per-document store failures.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// List documents whose status is completed and whose extraction payload
    /// is present, in a stable order.
    async fn completed_with_payload(&self) -> Result<Vec<Document>>;
}

/// Persistence for a document's chunk set.
///
/// A document's chunks are only ever written as a whole set; there is no
/// per-chunk mutation.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Number of chunks currently persisted for a document.
    ///
    /// A non-zero count marks the document as already processed; the
    /// backfill skips it.
    async fn count(&self, document_id: Uuid) -> Result<u64>;

    /// Atomically replace a document's chunk set with `chunks`, assigning
    /// each chunk's position from its slice index.
    ///
    /// The delete of the old set and the insert of the new set form one
    /// transaction: a concurrent reader never observes zero or mixed chunks
    /// mid-replace. An empty `chunks` still deletes, so a reprocess can never
    /// leave stale rows behind.
    async fn replace(&self, document_id: Uuid, chunks: &[NewChunk]) -> Result<()>;
}
