//! One-shot backfill job.
//!
//! Reads every completed document lacking chunks from the document store and
//! runs the ingestion pipeline over each. Exits 0 after processing all
//! documents regardless of individual outcomes; exits non-zero only when the
//! run cannot start or the document source cannot be enumerated.
//!
//! Environment:
//! - `DATABASE_URL` (required) — Postgres connection string.
//! - `OPENAI_API_KEY` (required) — embedding provider credential.
//! - `DOCVEC_CHUNK_SIZE`, `DOCVEC_CHUNK_OVERLAP`, `DOCVEC_EMBEDDING_MODEL`,
//!   `DOCVEC_EMBEDDING_DIMENSIONS` (optional) — config overrides.
//! - `RUST_LOG` (optional) — tracing filter, defaults to `info`.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use docvec::{
    BackfillOrchestrator, BackfillReport, IngestConfig, IngestError, OpenAiEmbeddings, PgStore,
    Result,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(report) => {
            info!(
                processed = report.processed,
                skipped = report.skipped,
                failed = report.failed,
                "backfill finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "backfill aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<BackfillReport> {
    let config = config_from_env()?;

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| IngestError::Config("DATABASE_URL environment variable not set".into()))?;
    let store = Arc::new(PgStore::connect(&database_url).await?);
    store.ensure_schema(config.dimensions).await?;

    let provider = Arc::new(
        OpenAiEmbeddings::from_env()?
            .with_model(config.model.clone())
            .with_dimensions(config.dimensions),
    );

    let orchestrator = BackfillOrchestrator::builder()
        .config(config)
        .source(store.clone())
        .store(store)
        .provider(provider)
        .build()?;

    orchestrator.run().await
}

fn config_from_env() -> Result<IngestConfig> {
    let mut builder = IngestConfig::builder();
    if let Some(size) = env_usize("DOCVEC_CHUNK_SIZE")? {
        builder = builder.chunk_size(size);
    }
    if let Some(overlap) = env_usize("DOCVEC_CHUNK_OVERLAP")? {
        builder = builder.chunk_overlap(overlap);
    }
    if let Ok(model) = std::env::var("DOCVEC_EMBEDDING_MODEL") {
        builder = builder.model(model);
    }
    if let Some(dimensions) = env_usize("DOCVEC_EMBEDDING_DIMENSIONS")? {
        builder = builder.dimensions(dimensions);
    }
    builder.build()
}

fn env_usize(name: &str) -> Result<Option<usize>> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| IngestError::Config(format!("{name} must be a positive integer"))),
        Err(_) => Ok(None),
    }
}
