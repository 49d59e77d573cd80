//! Data types for documents and their persisted chunks.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing status of an upstream document.
///
/// Only [`Completed`](DocumentStatus::Completed) documents are eligible for
/// ingestion. Stored as lowercase text at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Uploaded but not yet picked up by the extraction step.
    Pending,
    /// Extraction in progress.
    Processing,
    /// Extraction finished; payload available.
    Completed,
    /// Extraction failed; no usable payload.
    Failed,
}

impl DocumentStatus {
    /// The lowercase storage representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DocumentStatus::Pending),
            "processing" => Ok(DocumentStatus::Processing),
            "completed" => Ok(DocumentStatus::Completed),
            "failed" => Ok(DocumentStatus::Failed),
            other => Err(format!("unknown document status '{other}'")),
        }
    }
}

/// A source document as seen by the ingestion pipeline.
///
/// Documents are owned by the upstream system; this crate only reads them.
/// The extraction payload is an opaque JSON-like tree produced by the
/// document-understanding step, with no fixed schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: Uuid,
    /// Current processing status.
    pub status: DocumentStatus,
    /// Structured extraction output, if extraction has produced any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction: Option<serde_json::Value>,
}

/// A persisted passage of a document with its vector embedding.
///
/// For a given document, positions form a dense `0..N-1` sequence, content is
/// never empty after trimming, and the embedding has the configured
/// dimensionality. Chunk sets are replaced wholesale, never patched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: Uuid,
    /// The owning document.
    pub document_id: Uuid,
    /// The trimmed text content of the chunk.
    pub content: String,
    /// Zero-based position within the document's chunk sequence.
    pub position: usize,
    /// Approximate token count (see [`estimate_tokens`](crate::tokens::estimate_tokens)).
    pub token_count: usize,
    /// The embedding vector for this chunk's content.
    pub embedding: Vec<f32>,
    /// When this chunk was persisted.
    pub created_at: DateTime<Utc>,
}

/// A chunk ready for insertion.
///
/// The store assigns id, position (from slice order), and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChunk {
    /// The trimmed text content of the chunk.
    pub content: String,
    /// Approximate token count for storage metadata.
    pub token_count: usize,
    /// The embedding vector for this chunk's content.
    pub embedding: Vec<f32>,
}
