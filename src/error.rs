//! Error types for the `docvec` crate.

use thiserror::Error;

/// Errors that can occur during document ingestion.
///
/// Linearization, token estimation, and chunking are total functions and
/// never produce errors; everything that can fail is an external capability
/// (embedding provider, chunk store, document source) or configuration.
#[derive(Debug, Error)]
pub enum IngestError {
    /// An error from the embedding provider: missing credentials, transport
    /// or API failure, or a response that does not match the request
    /// (wrong cardinality, wrong vector dimensionality).
    #[error("Embedding provider error ({provider}): {message}")]
    Provider {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error from the chunk store or its backing database.
    #[error("Persistence error ({store}): {message}")]
    Persistence {
        /// The store backend that produced the error.
        store: String,
        /// A description of the failure.
        message: String,
    },

    /// The document source itself could not be enumerated. Unlike the
    /// per-document errors above, this is fatal to a backfill run.
    #[error("Orchestration error: {0}")]
    Orchestration(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
