use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::DomainError;

const EXTENSION: &str = "png";

/// Output directory for generated images. Files are named `{prefix}_{n}.png`
/// with the smallest `n >= 1` not already taken; existing files are never
/// overwritten.
#[derive(Debug, Clone)]
pub struct ImageDirectory {
    dir: PathBuf,
    prefix: String,
}

impl ImageDirectory {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    fn path_for(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.{EXTENSION}", self.prefix, n))
    }

    pub async fn next_available_path(&self) -> Result<PathBuf, DomainError> {
        let mut n = 1;
        loop {
            let candidate = self.path_for(n);
            let taken = tokio::fs::try_exists(&candidate)
                .await
                .map_err(|e| io_error(&candidate, e))?;
            if !taken {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Writes `bytes` to the next free name, creating the directory first.
    pub async fn save(&self, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;

        loop {
            let path = self.next_available_path().await?;
            // create_new fails instead of clobbering a file that appeared meanwhile.
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            match file {
                Ok(mut file) => {
                    file.write_all(bytes).await.map_err(|e| io_error(&path, e))?;
                    file.flush().await.map_err(|e| io_error(&path, e))?;
                    info!(path = %path.display(), bytes = bytes.len(), "image saved");
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(io_error(&path, e)),
            }
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> DomainError {
    DomainError::internal(format!("{}: {e}", path.display()))
}
