//! Configuration for the ingestion pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Configuration parameters for the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Embedding model identifier sent to the provider.
    pub model: String,
    /// Dimensionality of the embedding vectors.
    pub dimensions: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

impl IngestConfig {
    /// Create a new builder for constructing an [`IngestConfig`].
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`IngestConfig`].
#[derive(Debug, Clone, Default)]
pub struct IngestConfigBuilder {
    config: IngestConfig,
}

impl IngestConfigBuilder {
    /// Set the target chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the embedding model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the embedding dimensionality.
    pub fn dimensions(mut self, dimensions: usize) -> Self {
        self.config.dimensions = dimensions;
        self
    }

    /// Build the [`IngestConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Config`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `dimensions == 0`
    /// - `model` is empty
    pub fn build(self) -> Result<IngestConfig> {
        if self.config.chunk_size == 0 {
            return Err(IngestError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(IngestError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.dimensions == 0 {
            return Err(IngestError::Config("dimensions must be greater than zero".to_string()));
        }
        if self.config.model.is_empty() {
            return Err(IngestError::Config("model must not be empty".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = IngestConfig::builder().build().unwrap();
        assert_eq!(config, IngestConfig::default());
    }

    #[test]
    fn rejects_overlap_not_less_than_size() {
        let err = IngestConfig::builder().chunk_size(100).chunk_overlap(100).build().unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = IngestConfig::builder().dimensions(0).build().unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
    }

    #[test]
    fn rejects_empty_model() {
        let err = IngestConfig::builder().model("").build().unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
    }
}
