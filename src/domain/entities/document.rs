use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub content_type: String,
    pub pages: Vec<RawPage>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content_type: "text/plain".to_string(),
            pages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_pages(mut self, pages: Vec<RawPage>) -> Self {
        self.pages = pages;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Text of one page as produced by a loader. `page` is 1-based and absent for
/// sources that have no notion of pages. Loaders that see zero-based page
/// indices shift them by one, so the first PDF page is labelled `Page 1`,
/// not `Page 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPage {
    pub content: String,
    pub page: Option<usize>,
}

impl RawPage {
    pub fn new(content: impl Into<String>, page: Option<usize>) -> Self {
        Self {
            content: content.into(),
            page,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub chunk_index: usize,
    pub metadata: ChunkMetadata,
}

impl DocumentChunk {
    pub fn new(document_id: Uuid, content: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content: content.into(),
            chunk_index,
            metadata: ChunkMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ChunkMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub page: Option<usize>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub distance: f32,
}

/// Splits pages into overlapping character windows.
///
/// Every window holds `chunk_size` characters except the last one of a page,
/// which ends at the page boundary. Consecutive windows of the same page share
/// exactly `overlap` characters. Windows never span two pages, blank pages are
/// skipped, and chunk indices run from 0 across the whole document.
pub fn split_pages(
    document_id: Uuid,
    source: Option<&str>,
    pages: &[RawPage],
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<DocumentChunk>> {
    if chunk_size == 0 {
        return Err(DomainError::validation("chunk size must be greater than zero"));
    }
    if overlap >= chunk_size {
        return Err(DomainError::validation(format!(
            "chunk overlap ({overlap}) must be smaller than chunk size ({chunk_size})"
        )));
    }

    let step = chunk_size - overlap;
    let mut chunks = Vec::new();

    for page in pages {
        if page.content.trim().is_empty() {
            continue;
        }

        let chars: Vec<char> = page.content.chars().collect();
        let mut start = 0;

        loop {
            let end = (start + chunk_size).min(chars.len());
            let content: String = chars[start..end].iter().collect();
            let metadata = ChunkMetadata {
                page: page.page,
                source: source.map(str::to_string),
            };
            let chunk_index = chunks.len();
            chunks.push(DocumentChunk::new(document_id, content, chunk_index).with_metadata(metadata));

            if end == chars.len() {
                break;
            }
            start += step;
        }
    }

    Ok(chunks)
}
