mod conversation;
mod document;
mod embedding;
mod inference;

pub use conversation::{Conversation, Message, MessageRole};
pub use document::{split_pages, ChunkMetadata, Document, DocumentChunk, RawPage, SearchResult};
pub use embedding::{DistanceMetric, Embedding};
pub use inference::{InferenceConfig, InferenceRequest, InferenceResponse, JobHandle, TokenUsage};
