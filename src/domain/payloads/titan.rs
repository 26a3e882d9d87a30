use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::{decode_body, ModelFamily, ModelPayload};
use crate::domain::errors::{DomainError, Result};
use crate::domain::Embedding;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanEmbeddingRequest {
    pub input_text: String,
}

impl TitanEmbeddingRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            input_text: text.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TitanEmbeddingResponse {
    embedding: Vec<f32>,
}

impl ModelPayload for TitanEmbeddingRequest {
    const FAMILY: ModelFamily = ModelFamily::Embedding;

    type Output = Embedding;

    fn parse_response(body: &[u8]) -> Result<Embedding> {
        let response: TitanEmbeddingResponse = decode_body(Self::FAMILY, body)?;
        if response.embedding.is_empty() {
            return Err(DomainError::parse("embedding response was empty"));
        }
        Ok(Embedding::new(response.embedding))
    }
}

/// Text-to-image request in the Titan image generator native format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanImageRequest {
    pub task_type: &'static str,
    pub text_to_image_params: TextToImageParams,
    pub image_generation_config: ImageGenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToImageParams {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationConfig {
    pub number_of_images: u32,
    pub quality: String,
    pub cfg_scale: f32,
    pub height: u32,
    pub width: u32,
    pub seed: u32,
}

impl TitanImageRequest {
    pub fn new(prompt: impl Into<String>, config: ImageGenerationConfig) -> Self {
        Self {
            task_type: "TEXT_IMAGE",
            text_to_image_params: TextToImageParams {
                text: prompt.into(),
                negative_text: None,
            },
            image_generation_config: config,
        }
    }

    pub fn with_negative_text(mut self, negative: Option<String>) -> Self {
        self.text_to_image_params.negative_text = negative;
        self
    }
}

#[derive(Debug, Deserialize)]
struct TitanImageResponse {
    #[serde(default)]
    images: Vec<String>,
    error: Option<String>,
}

impl ModelPayload for TitanImageRequest {
    const FAMILY: ModelFamily = ModelFamily::ImageGeneration;

    /// Decoded image files, in the order the model returned them.
    type Output = Vec<Vec<u8>>;

    fn parse_response(body: &[u8]) -> Result<Vec<Vec<u8>>> {
        let response: TitanImageResponse = decode_body(Self::FAMILY, body)?;

        if let Some(error) = response.error {
            return Err(DomainError::model(error));
        }
        if response.images.is_empty() {
            return Err(DomainError::parse("image response contained no images"));
        }

        response
            .images
            .iter()
            .map(|encoded| {
                STANDARD
                    .decode(encoded)
                    .map_err(|e| DomainError::parse(format!("invalid base64 image data: {e}")))
            })
            .collect()
    }
}
