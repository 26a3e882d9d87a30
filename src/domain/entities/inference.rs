use serde::{Deserialize, Serialize};

use super::conversation::Message;

/// Sampling and length parameters for a single generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
    pub stop_sequences: Vec<String>,
}

impl InferenceConfig {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: None,
            stop_sequences: Vec::new(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new(0.0, 100)
    }
}

#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub model_id: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<Message>,
    pub config: InferenceConfig,
}

impl InferenceRequest {
    pub fn new(model_id: impl Into<String>, messages: Vec<Message>, config: InferenceConfig) -> Self {
        Self {
            model_id: model_id.into(),
            system_prompt: None,
            messages,
            config,
        }
    }

    pub fn with_system_prompt(mut self, system: impl Into<String>) -> Self {
        self.system_prompt = Some(system.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub text: String,
    pub stop_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl InferenceResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stop_reason: None,
            usage: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Handle of a submitted long-running generation job. Results are delivered
/// out of band to the output location given at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHandle {
    pub invocation_arn: String,
}
