//! Source document loaders.

mod pdf;
mod text;

pub use pdf::PdfLoader;
pub use text::PlainTextLoader;

use async_trait::async_trait;
use std::io;
use std::path::Path;

use crate::domain::{ports::DocumentLoader, Document, DomainError};

/// Picks a loader from the file extension: `.pdf` goes to [`PdfLoader`],
/// `.txt`, `.md` and extension-less files to [`PlainTextLoader`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

#[async_trait]
impl DocumentLoader for FileLoader {
    async fn load(&self, path: &Path) -> Result<Document, DomainError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => PdfLoader.load(path).await,
            Some("txt") | Some("md") | Some("text") | None => PlainTextLoader.load(path).await,
            Some(other) => {
                ensure_exists(path).await?;
                Err(DomainError::parse(format!(
                    "unsupported document type .{other}: {}",
                    path.display()
                )))
            }
        }
    }
}

pub(crate) async fn ensure_exists(path: &Path) -> Result<(), DomainError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(DomainError::not_found(format!("{} is not a file", path.display()))),
        Err(e) => Err(read_error(path, e)),
    }
}

pub(crate) fn read_error(path: &Path, e: io::Error) -> DomainError {
    match e.kind() {
        io::ErrorKind::NotFound => DomainError::not_found(path.display().to_string()),
        io::ErrorKind::InvalidData => {
            DomainError::parse(format!("{} could not be decoded: {e}", path.display()))
        }
        _ => DomainError::internal(format!("failed to read {}: {e}", path.display())),
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
