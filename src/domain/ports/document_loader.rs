use async_trait::async_trait;
use std::path::Path;

use crate::domain::{errors::DomainError, Document};

#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<Document, DomainError>;
}
