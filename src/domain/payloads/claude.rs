use serde::{Deserialize, Serialize};

use super::{decode_body, ModelFamily, ModelPayload};
use crate::domain::errors::{DomainError, Result};
use crate::domain::{InferenceResponse, Message, TokenUsage};

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Anthropic messages body for `invoke_model`.
#[derive(Debug, Clone, Serialize)]
pub struct ClaudeMessagesRequest {
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ClaudeMessagesRequest {
    pub fn new(messages: Vec<Message>, max_tokens: u32) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens,
            messages,
            system: None,
            temperature: None,
        }
    }

    pub fn with_system(mut self, system: Option<String>) -> Self {
        self.system = system;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
    stop_reason: Option<String>,
    usage: Option<ClaudeUsage>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ModelPayload for ClaudeMessagesRequest {
    const FAMILY: ModelFamily = ModelFamily::TextChat;

    type Output = InferenceResponse;

    fn parse_response(body: &[u8]) -> Result<InferenceResponse> {
        let response: ClaudeResponse = decode_body(Self::FAMILY, body)?;

        let text = response
            .content
            .into_iter()
            .find(|c| c.kind == "text")
            .and_then(|c| c.text)
            .ok_or_else(|| DomainError::parse("response contained no text block"))?;

        Ok(InferenceResponse {
            text,
            stop_reason: response.stop_reason,
            usage: response.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = ClaudeMessagesRequest::new(
            vec![Message::user("hi"), Message::assistant("hello"), Message::user("bye")],
            1000,
        );
        let body: serde_json::Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();

        assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["messages"][2]["content"], "bye");
        assert!(body.get("system").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = br#"{
            "id": "msg_1",
            "content": [{"type": "text", "text": "There are 50 states."}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 7}
        }"#;

        let response = ClaudeMessagesRequest::parse_response(body).unwrap();
        assert_eq!(response.text, "There are 50 states.");
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(response.usage.unwrap().output_tokens, 7);
    }

    #[test]
    fn test_parse_response_without_text() {
        let body = br#"{"content": [], "stop_reason": "max_tokens"}"#;
        assert!(matches!(
            ClaudeMessagesRequest::parse_response(body),
            Err(DomainError::Parse(_))
        ));
        assert!(matches!(
            ClaudeMessagesRequest::parse_response(b"not json"),
            Err(DomainError::Parse(_))
        ));
    }
}
