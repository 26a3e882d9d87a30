use std::sync::Arc;
use tracing::info;

use super::logging::init_tracing;
use crate::application::{
    ChatSession, ChatSettings, DocumentService, GenerationService, ModelClient, QaService,
    RagService,
};
use crate::domain::{ports::ModelRuntime, DocumentChunk, DomainError};
use crate::infrastructure::{
    AppConfig, BedrockRuntime, Credentials, FileLoader, ImageDirectory, InMemoryVectorStore,
    TitanEmbedding,
};

/// Everything a workflow needs, built once at process start and passed down.
pub struct AppContext {
    pub config: AppConfig,
    pub credentials: Credentials,
    pub client: ModelClient,
}

impl AppContext {
    /// `.env`, config file, logging, credentials, then the Bedrock client.
    /// Missing credentials fail here, before any client exists.
    pub fn from_env() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();
        let config = AppConfig::load()?;
        init_tracing(&config.config.logging);

        Self::bootstrap(
            config,
            |key| std::env::var(key).ok(),
            |credentials| Arc::new(BedrockRuntime::new(credentials)),
        )
    }

    /// `connect` runs only once the credentials are complete.
    pub fn bootstrap<L, F>(config: AppConfig, lookup: L, connect: F) -> Result<Self, DomainError>
    where
        L: Fn(&str) -> Option<String>,
        F: FnOnce(&Credentials) -> Arc<dyn ModelRuntime>,
    {
        let credentials = Credentials::from_lookup(lookup)?;
        info!(region = %credentials.region, "credentials loaded");

        let client = ModelClient::new(connect(&credentials));
        Ok(Self {
            config,
            credentials,
            client,
        })
    }

    pub fn chat_session(&self) -> ChatSession {
        let chat = &self.config.config.chat;
        ChatSession::new(
            self.client.clone(),
            ChatSettings {
                model_id: self.config.config.models.chat.clone(),
                max_tokens: chat.max_tokens,
                temperature: chat.temperature,
                system_prompt: self.config.prompts.chat.system.clone(),
            },
        )
    }

    pub fn generation(&self) -> GenerationService {
        GenerationService::new(self.client.clone())
    }

    pub fn image_directory(&self) -> ImageDirectory {
        let image = &self.config.config.image;
        ImageDirectory::new(&image.output_dir, &image.file_prefix)
    }

    pub fn document_service(&self) -> DocumentService {
        let rag = &self.config.config.rag;
        DocumentService::with_chunking(Arc::new(FileLoader), rag.chunk_size, rag.chunk_overlap)
    }

    /// Embeds `chunks` into a fresh in-memory index and returns the QA service
    /// answering over it.
    pub async fn qa_service(&self, chunks: &[DocumentChunk]) -> Result<QaService, DomainError> {
        let config = &self.config.config;
        let prompts = &self.config.prompts.rag;

        let embedding = Arc::new(TitanEmbedding::from_config(self.client.clone(), config));
        let store = Arc::new(InMemoryVectorStore::with_metric(config.rag.distance));
        let rag = Arc::new(RagService::new(embedding, store, config.rag.top_k));

        rag.index_chunks(chunks).await?;
        info!(chunks = chunks.len(), metric = ?config.rag.distance, "index built");

        Ok(QaService::new(
            rag,
            self.client.clone(),
            &config.models.rag,
            config.rag.inference.clone(),
        )
        .with_prompt(&prompts.template, &prompts.no_context))
    }
}
