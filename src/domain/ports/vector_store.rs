use crate::domain::{errors::DomainError, DocumentChunk, Embedding, SearchResult};
use async_trait::async_trait;

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn add(&self, chunk: &DocumentChunk, embedding: &Embedding) -> Result<(), DomainError>;

    /// At most `top_k` results ordered by ascending distance.
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError>;

    async fn len(&self) -> Result<usize, DomainError>;
}
