pub mod bedrock;
pub mod config;
pub mod credentials;
pub mod embedding;
pub mod loader;
pub mod storage;
pub mod vector_store;

pub use bedrock::BedrockRuntime;
pub use config::{AppConfig, Config, LogFormat, PromptsConfig};
pub use credentials::Credentials;
pub use embedding::TitanEmbedding;
pub use loader::{FileLoader, PdfLoader, PlainTextLoader};
pub use storage::ImageDirectory;
pub use vector_store::InMemoryVectorStore;
