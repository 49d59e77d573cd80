//! Orchestrator behavior over in-memory stores and a scripted provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use docvec::{
    BackfillOrchestrator, ChunkStore, Document, DocumentStatus, EmbeddingProvider, InMemoryStore,
    IngestConfig, IngestError, Result,
};

/// Deterministic provider: embeds each text as `[position; dims]`, optionally
/// failing whenever any input contains a marker substring.
struct StubProvider {
    dimensions: usize,
    calls: AtomicUsize,
    fail_marker: Option<String>,
}

impl StubProvider {
    fn new(dimensions: usize) -> Self {
        Self { dimensions, calls: AtomicUsize::new(0), fail_marker: None }
    }

    fn failing_on(dimensions: usize, marker: &str) -> Self {
        Self { dimensions, calls: AtomicUsize::new(0), fail_marker: Some(marker.to_string()) }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StubProvider {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = &self.fail_marker {
            if texts.iter().any(|t| t.contains(marker.as_str())) {
                return Err(IngestError::Provider {
                    provider: "stub".into(),
                    message: "simulated outage".into(),
                });
            }
        }
        Ok((0..texts.len()).map(|i| vec![i as f32; self.dimensions]).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn orchestrator(
    store: &Arc<InMemoryStore>,
    provider: &Arc<StubProvider>,
) -> BackfillOrchestrator {
    let config = IngestConfig::builder()
        .chunk_size(64)
        .chunk_overlap(8)
        .model("stub-model")
        .dimensions(3)
        .build()
        .unwrap();
    BackfillOrchestrator::builder()
        .config(config)
        .source(store.clone())
        .store(store.clone())
        .provider(provider.clone())
        .build()
        .unwrap()
}

fn completed_document(payload: serde_json::Value) -> Document {
    Document { id: Uuid::new_v4(), status: DocumentStatus::Completed, extraction: Some(payload) }
}

#[tokio::test]
async fn processes_document_end_to_end() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(StubProvider::new(3));
    let document = completed_document(json!({"patient": {"name": "Jane Doe"}, "notes": null}));
    let document_id = document.id;
    store.push_document(document).await;

    let report = orchestrator(&store, &provider).run().await.unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);

    let chunks = store.chunks_for(document_id).await;
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "patient.name: Jane Doe");
    assert_eq!(chunks[0].position, 0);
    assert_eq!(chunks[0].token_count, 6);
    assert_eq!(chunks[0].embedding.len(), 3);
}

#[tokio::test]
async fn rerun_skips_documents_that_already_have_chunks() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(StubProvider::new(3));
    store.push_document(completed_document(json!({"field": "value"}))).await;

    let orchestrator = orchestrator(&store, &provider);
    let first = orchestrator.run().await.unwrap();
    assert_eq!(first.processed, 1);
    assert_eq!(provider.call_count(), 1);

    let second = orchestrator.run().await.unwrap();
    assert_eq!(second.processed, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(second.failed, 0);
    // no delete, no provider call on the skipped rerun
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn one_failing_document_does_not_abort_the_batch() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(StubProvider::failing_on(3, "POISON"));
    let failing = completed_document(json!({"body": "POISON pill"}));
    let healthy = completed_document(json!({"body": "routine note"}));
    let failing_id = failing.id;
    let healthy_id = healthy.id;
    store.push_document(failing).await;
    store.push_document(healthy).await;

    let report = orchestrator(&store, &provider).run().await.unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 1);

    // the failed document keeps zero chunks and is retryable
    assert_eq!(store.count(failing_id).await.unwrap(), 0);
    assert_eq!(store.count(healthy_id).await.unwrap(), 1);
}

#[tokio::test]
async fn long_documents_get_dense_positions_and_matching_vectors() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(StubProvider::new(3));
    let document = completed_document(json!({"text": "lorem ipsum dolor sit amet ".repeat(20)}));
    let document_id = document.id;
    store.push_document(document).await;

    let report = orchestrator(&store, &provider).run().await.unwrap();
    assert_eq!(report.processed, 1);

    let chunks = store.chunks_for(document_id).await;
    assert!(chunks.len() > 1, "expected multiple chunks, got {}", chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.position, i);
        assert!(!chunk.content.trim().is_empty());
        // the stub encodes the request position into the vector, so order
        // survived the zip
        assert_eq!(chunk.embedding, vec![i as f32; 3]);
        assert!(chunk.token_count > 0);
    }
}

#[tokio::test]
async fn ineligible_documents_are_not_selected() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(StubProvider::new(3));
    store
        .push_document(Document {
            id: Uuid::new_v4(),
            status: DocumentStatus::Pending,
            extraction: Some(json!({"k": "v"})),
        })
        .await;
    store
        .push_document(Document {
            id: Uuid::new_v4(),
            status: DocumentStatus::Completed,
            extraction: None,
        })
        .await;

    let report = orchestrator(&store, &provider).run().await.unwrap();
    assert_eq!(report.processed, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn payload_that_linearizes_to_nothing_still_counts_as_processed() {
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(StubProvider::new(3));
    let document = completed_document(json!({"notes": null, "attachments": []}));
    let document_id = document.id;
    store.push_document(document).await;

    let report = orchestrator(&store, &provider).run().await.unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(store.count(document_id).await.unwrap(), 0);
    // nothing to embed, so the provider is never called
    assert_eq!(provider.call_count(), 0);
}
