use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{
    ports::VectorStore, DistanceMetric, DocumentChunk, DomainError, Embedding, SearchResult,
};

/// Exact nearest-neighbour search over every stored vector.
///
/// Results are ordered by ascending distance; equal distances keep insertion
/// order.
pub struct InMemoryVectorStore {
    chunks: RwLock<Vec<(DocumentChunk, Embedding)>>,
    metric: DistanceMetric,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::with_metric(DistanceMetric::default())
    }

    pub fn with_metric(metric: DistanceMetric) -> Self {
        Self {
            chunks: RwLock::new(Vec::new()),
            metric,
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, chunk: &DocumentChunk, embedding: &Embedding) -> Result<(), DomainError> {
        let mut store = self
            .chunks
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        if let Some((_, first)) = store.first() {
            if first.dimension() != embedding.dimension() {
                return Err(DomainError::validation(format!(
                    "embedding dimension {} does not match index dimension {}",
                    embedding.dimension(),
                    first.dimension()
                )));
            }
        }

        store.push((chunk.clone(), embedding.clone()));
        Ok(())
    }

    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let store = self
            .chunks
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        if let Some((_, first)) = store.first() {
            if first.dimension() != query.dimension() {
                return Err(DomainError::validation(format!(
                    "query dimension {} does not match index dimension {}",
                    query.dimension(),
                    first.dimension()
                )));
            }
        }

        let mut results: Vec<SearchResult> = store
            .iter()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                distance: query.distance(embedding, self.metric),
            })
            .collect();

        // Stable sort: ties stay in insertion order.
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(top_k);

        Ok(results)
    }

    async fn len(&self) -> Result<usize, DomainError> {
        self.chunks
            .read()
            .map(|store| store.len())
            .map_err(|e| DomainError::internal(e.to_string()))
    }
}
