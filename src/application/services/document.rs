use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::{split_pages, ports::DocumentLoader, Document, DocumentChunk, DomainError};

pub struct DocumentService {
    loader: Arc<dyn DocumentLoader>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl DocumentService {
    pub fn new(loader: Arc<dyn DocumentLoader>) -> Self {
        Self {
            loader,
            chunk_size: 1000,
            chunk_overlap: 100,
        }
    }

    pub fn with_chunking(
        loader: Arc<dyn DocumentLoader>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            loader,
            chunk_size,
            chunk_overlap,
        }
    }

    pub async fn load(&self, path: &Path) -> Result<Document, DomainError> {
        self.loader.load(path).await
    }

    pub fn split(&self, document: &Document) -> Result<Vec<DocumentChunk>, DomainError> {
        split_pages(
            document.id,
            Some(&document.name),
            &document.pages,
            self.chunk_size,
            self.chunk_overlap,
        )
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest(&self, path: &Path) -> Result<(Document, Vec<DocumentChunk>), DomainError> {
        let document = self.load(path).await?;
        info!(pages = document.page_count(), "document loaded");

        let chunks = self.split(&document)?;
        info!(
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            overlap = self.chunk_overlap,
            "document split"
        );

        Ok((document, chunks))
    }
}
