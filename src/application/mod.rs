//! Application layer - Use cases and orchestration.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! implementations; the model runtime is reached through [`ModelClient`].

pub mod client;
pub mod services;

pub use client::ModelClient;
pub use services::{
    Answer, ChatSession, ChatSettings, DocumentService, GenerationService, QaService, RagService,
    SessionState,
};
