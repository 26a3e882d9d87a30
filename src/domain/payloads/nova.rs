use serde::{Deserialize, Serialize};

use super::{decode_body, ModelFamily, ModelPayload};
use crate::domain::errors::Result;
use crate::domain::JobHandle;

/// Text-to-video model input for Nova Reel. Only valid as an async job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaReelRequest {
    pub task_type: &'static str,
    pub text_to_video_params: TextToVideoParams,
    pub video_generation_config: VideoGenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextToVideoParams {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationConfig {
    pub duration_seconds: u32,
    pub fps: u32,
    pub dimension: String,
    pub seed: u32,
}

impl NovaReelRequest {
    pub fn new(prompt: impl Into<String>, config: VideoGenerationConfig) -> Self {
        Self {
            task_type: "TEXT_VIDEO",
            text_to_video_params: TextToVideoParams {
                text: prompt.into(),
            },
            video_generation_config: config,
        }
    }
}

impl ModelPayload for NovaReelRequest {
    const FAMILY: ModelFamily = ModelFamily::VideoGeneration;

    type Output = JobHandle;

    /// Parses the job descriptor returned on submission.
    fn parse_response(body: &[u8]) -> Result<JobHandle> {
        decode_body(Self::FAMILY, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_model_input_shape() {
        let request = NovaReelRequest::new(
            "a tiger walking through grass",
            VideoGenerationConfig {
                duration_seconds: 6,
                fps: 24,
                dimension: "1280x720".to_string(),
                seed: 1,
            },
        );

        assert_eq!(
            request.to_value().unwrap(),
            serde_json::json!({
                "taskType": "TEXT_VIDEO",
                "textToVideoParams": { "text": "a tiger walking through grass" },
                "videoGenerationConfig": {
                    "durationSeconds": 6,
                    "fps": 24,
                    "dimension": "1280x720",
                    "seed": 1
                }
            })
        );
    }

    #[test]
    fn test_parse_job_descriptor() {
        let handle = NovaReelRequest::parse_response(
            br#"{"invocationArn": "arn:aws:bedrock:us-east-1:123:async-invoke/abc"}"#,
        )
        .unwrap();
        assert_eq!(handle.invocation_arn, "arn:aws:bedrock:us-east-1:123:async-invoke/abc");

        assert!(matches!(
            NovaReelRequest::parse_response(b"{}"),
            Err(DomainError::Parse(_))
        ));
    }
}
