//! Embedding provider trait for turning chunk text into vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates fixed-dimensionality embeddings for text.
///
/// The pipeline submits all of a document's chunk texts as one ordered batch,
/// so the trait is batch-only. Implementations must return exactly one vector
/// per input, in input order, each of [`dimensions()`](EmbeddingProvider::dimensions)
/// length; anything else is an [`IngestError::Provider`](crate::IngestError::Provider).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate one embedding vector per input text, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// The dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;
}
