mod document_loader;
mod embedding;
mod runtime;
mod vector_store;

pub use document_loader::DocumentLoader;
pub use embedding::EmbeddingService;
pub use runtime::ModelRuntime;
pub use vector_store::VectorStore;
