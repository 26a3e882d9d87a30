use async_trait::async_trait;

use crate::application::ModelClient;
use crate::domain::{
    payloads::TitanEmbeddingRequest, ports::EmbeddingService, DomainError, Embedding,
};
use crate::infrastructure::config::Config;

/// Titan text embeddings, one `invoke_model` call per text.
pub struct TitanEmbedding {
    client: ModelClient,
    model: String,
    dimension: usize,
}

impl TitanEmbedding {
    pub fn new(client: ModelClient) -> Self {
        Self {
            client,
            model: "amazon.titan-embed-text-v1".to_string(),
            dimension: 1536,
        }
    }

    pub fn from_config(client: ModelClient, config: &Config) -> Self {
        Self {
            client,
            model: config.models.embedding.clone(),
            dimension: config.rag.embedding_dimension,
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

#[async_trait]
impl EmbeddingService for TitanEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let embedding = self
            .client
            .invoke(&self.model, &TitanEmbeddingRequest::new(text))
            .await?;

        if embedding.dimension() != self.dimension {
            return Err(DomainError::parse(format!(
                "{} returned a {}-dimensional embedding, expected {}",
                self.model,
                embedding.dimension(),
                self.dimension
            )));
        }

        Ok(embedding)
    }
}
