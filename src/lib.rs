//! # docvec
//!
//! Document-to-vector ingestion: turns structured extraction output
//! (JSON-like key/value trees from an upstream document-understanding step)
//! into ordered, bounded-size text passages, embeds each passage via an
//! external provider, and persists passages with their vectors for later
//! similarity search.
//!
//! The pipeline per document:
//!
//! ```text
//! extraction payload → linearize → chunk → embed (one batch) → replace chunk set
//! ```
//!
//! - [`linearize`] flattens a payload into ordered `path: value` lines.
//! - [`WindowChunker`] splits the text into overlapping, break-aware windows.
//! - [`EmbeddingProvider`] maps the ordered chunk texts to ordered vectors;
//!   [`OpenAiEmbeddings`] is the production implementation.
//! - [`ChunkStore::replace`](store::ChunkStore::replace) swaps a document's
//!   persisted chunk set atomically; [`PgStore`] backs it with
//!   Postgres/pgvector, [`InMemoryStore`] with maps for tests.
//! - [`BackfillOrchestrator`] runs the whole thing as an idempotent one-shot
//!   batch: documents that already have chunks are skipped, and one
//!   document's failure never aborts the run.

pub mod backfill;
pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod linearize;
pub mod memory;
pub mod openai;
pub mod pg;
pub mod store;
pub mod tokens;

pub use backfill::{BackfillOrchestrator, BackfillReport};
pub use chunking::{DEFAULT_BREAK_PATTERNS, WindowChunker};
pub use config::IngestConfig;
pub use document::{Chunk, Document, DocumentStatus, NewChunk};
pub use embedding::EmbeddingProvider;
pub use error::{IngestError, Result};
pub use linearize::{linearize, linearize_from};
pub use memory::InMemoryStore;
pub use openai::OpenAiEmbeddings;
pub use pg::PgStore;
pub use store::{ChunkStore, DocumentSource};
pub use tokens::estimate_tokens;
