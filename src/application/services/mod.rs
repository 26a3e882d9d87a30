mod chat;
mod document;
mod generation;
mod qa;
mod rag;

pub use chat::{ChatSession, ChatSettings, SessionState};
pub use document::DocumentService;
pub use generation::GenerationService;
pub use qa::{format_context, Answer, QaService, DEFAULT_NO_CONTEXT, DEFAULT_QA_TEMPLATE};
pub use rag::RagService;
