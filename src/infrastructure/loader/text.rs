use async_trait::async_trait;
use std::path::Path;

use super::{ensure_exists, file_name, read_error};
use crate::domain::{ports::DocumentLoader, Document, DomainError, RawPage};

const PAGE_BREAK: char = '\u{000C}';

/// UTF-8 text. Form feeds separate numbered pages; text without any is a
/// single unnumbered page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextLoader;

impl PlainTextLoader {
    pub fn pages(content: &str) -> Vec<RawPage> {
        if content.contains(PAGE_BREAK) {
            content
                .split(PAGE_BREAK)
                .enumerate()
                .map(|(i, text)| RawPage::new(text, Some(i + 1)))
                .collect()
        } else {
            vec![RawPage::new(content, None)]
        }
    }
}

#[async_trait]
impl DocumentLoader for PlainTextLoader {
    async fn load(&self, path: &Path) -> Result<Document, DomainError> {
        ensure_exists(path).await?;
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| read_error(path, e))?;

        Ok(Document::new(file_name(path)).with_pages(Self::pages(&content)))
    }
}
