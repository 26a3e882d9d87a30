use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use super::{ensure_exists, file_name, read_error};
use crate::domain::{ports::DocumentLoader, Document, DomainError, RawPage};

/// One [`RawPage`] per PDF page, numbered from 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

#[async_trait]
impl DocumentLoader for PdfLoader {
    async fn load(&self, path: &Path) -> Result<Document, DomainError> {
        ensure_exists(path).await?;
        let bytes = tokio::fs::read(path).await.map_err(|e| read_error(path, e))?;

        // pdf-extract is CPU bound and may panic on malformed input.
        let extracted =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
                .await
                .map_err(|e| {
                    if e.is_panic() {
                        DomainError::parse(format!("PDF extraction aborted for {}", path.display()))
                    } else {
                        DomainError::internal(format!("task join error: {e}"))
                    }
                })?
                .map_err(|e| {
                    DomainError::parse(format!("PDF extraction error for {}: {e}", path.display()))
                })?;

        let pages = number_pages(extracted);
        debug!(pages = pages.len(), path = %path.display(), "pdf extracted");

        Ok(Document::new(file_name(path))
            .with_content_type("application/pdf")
            .with_pages(pages))
    }
}

/// Page labels follow the printed numbering, so the first page is 1 rather
/// than the zero-based index some PDF readers report.
fn number_pages(extracted: Vec<String>) -> Vec<RawPage> {
    extracted
        .into_iter()
        .enumerate()
        .map(|(i, text)| RawPage::new(text, Some(i + 1)))
        .collect()
}
