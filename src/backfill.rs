//! One-shot backfill over all eligible documents.
//!
//! The [`BackfillOrchestrator`] walks every completed document that has an
//! extraction payload, skips the ones that already have chunks, and drives
//! the linearize → chunk → embed → replace pipeline for the rest. Documents
//! are processed strictly one at a time, each with a single batched embedding
//! call, so provider load stays bounded and no two replaces can race.
//!
//! # Example
//!
//! ```rust,ignore
//! use docvec::{BackfillOrchestrator, IngestConfig};
//!
//! let orchestrator = BackfillOrchestrator::builder()
//!     .config(IngestConfig::default())
//!     .source(store.clone())
//!     .store(store)
//!     .provider(provider)
//!     .build()?;
//!
//! let report = orchestrator.run().await?;
//! ```

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::chunking::WindowChunker;
use crate::config::IngestConfig;
use crate::document::{Document, NewChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::{IngestError, Result};
use crate::linearize::linearize;
use crate::store::{ChunkStore, DocumentSource};
use crate::tokens::estimate_tokens;

/// Outcome counts of a backfill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Documents whose chunk set was (re)built this run.
    pub processed: usize,
    /// Documents left untouched because chunks already existed.
    pub skipped: usize,
    /// Documents whose pipeline failed; they keep zero chunks and are
    /// retried by rerunning the batch.
    pub failed: usize,
}

enum Outcome {
    Processed(usize),
    Skipped,
}

/// Drives the ingestion pipeline across all eligible documents.
///
/// Construct one via [`BackfillOrchestrator::builder()`]. Capabilities are
/// passed in once at construction; there is no lazily-initialized shared
/// client anywhere in the pipeline.
pub struct BackfillOrchestrator {
    config: IngestConfig,
    source: Arc<dyn DocumentSource>,
    store: Arc<dyn ChunkStore>,
    provider: Arc<dyn EmbeddingProvider>,
    chunker: WindowChunker,
}

impl BackfillOrchestrator {
    /// Create a new [`BackfillOrchestratorBuilder`].
    pub fn builder() -> BackfillOrchestratorBuilder {
        BackfillOrchestratorBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Run the batch once.
    ///
    /// A failure while processing a single document is logged with the
    /// document id and counted; the run continues with the next document.
    /// Only a failure to enumerate the document source aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Orchestration`] if the document source cannot
    /// be listed.
    pub async fn run(&self) -> Result<BackfillReport> {
        let documents = self.source.completed_with_payload().await?;
        info!(count = documents.len(), "starting backfill");

        let mut report = BackfillReport::default();
        for document in &documents {
            match self.process_document(document).await {
                Ok(Outcome::Skipped) => {
                    report.skipped += 1;
                }
                Ok(Outcome::Processed(chunk_count)) => {
                    info!(document_id = %document.id, chunk_count, "processed document");
                    report.processed += 1;
                }
                Err(e) => {
                    error!(document_id = %document.id, error = %e, "document failed, continuing");
                    report.failed += 1;
                }
            }
        }

        info!(
            processed = report.processed,
            skipped = report.skipped,
            failed = report.failed,
            "backfill complete"
        );
        Ok(report)
    }

    async fn process_document(&self, document: &Document) -> Result<Outcome> {
        if self.store.count(document.id).await? > 0 {
            debug!(document_id = %document.id, "document already has chunks, skipping");
            return Ok(Outcome::Skipped);
        }

        // The source only returns documents with a payload; treat a missing
        // one as nothing to do rather than an error.
        let Some(extraction) = &document.extraction else {
            debug!(document_id = %document.id, "document has no extraction payload, skipping");
            return Ok(Outcome::Skipped);
        };

        let text = linearize(extraction);
        let contents = self.chunker.chunk(&text);

        if contents.is_empty() {
            // Still replace so a reprocess can never leave stale rows.
            self.store.replace(document.id, &[]).await?;
            return Ok(Outcome::Processed(0));
        }

        let inputs: Vec<&str> = contents.iter().map(String::as_str).collect();
        let embeddings = self.provider.embed_batch(&inputs).await?;

        let chunks: Vec<NewChunk> = contents
            .into_iter()
            .zip(embeddings)
            .map(|(content, embedding)| NewChunk {
                token_count: estimate_tokens(&content),
                content,
                embedding,
            })
            .collect();

        self.store.replace(document.id, &chunks).await?;
        Ok(Outcome::Processed(chunks.len()))
    }
}

/// Builder for constructing a [`BackfillOrchestrator`].
///
/// All fields are required. The chunker is derived from the configuration.
#[derive(Default)]
pub struct BackfillOrchestratorBuilder {
    config: Option<IngestConfig>,
    source: Option<Arc<dyn DocumentSource>>,
    store: Option<Arc<dyn ChunkStore>>,
    provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl BackfillOrchestratorBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: IngestConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the document source.
    pub fn source(mut self, source: Arc<dyn DocumentSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the chunk store.
    pub fn store(mut self, store: Arc<dyn ChunkStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the embedding provider.
    pub fn provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the [`BackfillOrchestrator`], validating that all fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Config`] if any required field is missing.
    pub fn build(self) -> Result<BackfillOrchestrator> {
        let config =
            self.config.ok_or_else(|| IngestError::Config("config is required".to_string()))?;
        let source =
            self.source.ok_or_else(|| IngestError::Config("source is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| IngestError::Config("store is required".to_string()))?;
        let provider = self
            .provider
            .ok_or_else(|| IngestError::Config("provider is required".to_string()))?;

        // Guards hand-built configs that bypassed IngestConfigBuilder.
        if config.chunk_overlap >= config.chunk_size {
            return Err(IngestError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }

        let chunker = WindowChunker::new(config.chunk_size, config.chunk_overlap);
        Ok(BackfillOrchestrator { config, source, store, provider, chunker })
    }
}
