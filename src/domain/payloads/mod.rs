//! Request/response shapes of the hosted model families.
//!
//! Each family is a typed request that serializes into the model's native
//! JSON body and knows how to parse that model's native response.

mod claude;
mod nova;
mod titan;

pub use claude::{ClaudeMessagesRequest, ANTHROPIC_VERSION};
pub use nova::{NovaReelRequest, VideoGenerationConfig};
pub use titan::{ImageGenerationConfig, TitanEmbeddingRequest, TitanImageRequest};

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::errors::{DomainError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    TextChat,
    Embedding,
    ImageGeneration,
    VideoGeneration,
}

impl ModelFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextChat => "text-chat",
            Self::Embedding => "embedding",
            Self::ImageGeneration => "image-generation",
            Self::VideoGeneration => "video-generation",
        }
    }
}

pub trait ModelPayload: Serialize + Send + Sync {
    const FAMILY: ModelFamily;

    type Output;

    fn to_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            DomainError::internal(format!("failed to encode {} request: {e}", Self::FAMILY.as_str()))
        })
    }

    fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            DomainError::internal(format!("failed to encode {} request: {e}", Self::FAMILY.as_str()))
        })
    }

    fn parse_response(body: &[u8]) -> Result<Self::Output>;
}

pub(crate) fn decode_body<T: DeserializeOwned>(family: ModelFamily, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        DomainError::parse(format!("malformed {} response: {e}", family.as_str()))
    })
}
