use tracing::{info, instrument};

use crate::application::client::ModelClient;
use crate::domain::{
    payloads::{NovaReelRequest, TitanImageRequest},
    DomainError, InferenceConfig, InferenceRequest, InferenceResponse, JobHandle, Message,
};

/// Single-shot text, image and video generation.
pub struct GenerationService {
    client: ModelClient,
}

impl GenerationService {
    pub fn new(client: ModelClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, system_prompt, prompt, config))]
    pub async fn generate_text(
        &self,
        model_id: &str,
        system_prompt: Option<&str>,
        prompt: &str,
        config: &InferenceConfig,
    ) -> Result<InferenceResponse, DomainError> {
        let mut request = InferenceRequest::new(model_id, vec![Message::user(prompt)], config.clone());
        if let Some(system) = system_prompt {
            request = request.with_system_prompt(system);
        }
        self.client.converse(&request).await
    }

    #[instrument(skip(self, request), fields(seed = request.image_generation_config.seed))]
    pub async fn generate_images(
        &self,
        model_id: &str,
        request: &TitanImageRequest,
    ) -> Result<Vec<Vec<u8>>, DomainError> {
        let images = self.client.invoke(model_id, request).await?;
        info!(count = images.len(), "images generated");
        Ok(images)
    }

    #[instrument(skip(self, request))]
    pub async fn start_video(
        &self,
        model_id: &str,
        request: &NovaReelRequest,
        output_uri: &str,
    ) -> Result<JobHandle, DomainError> {
        let handle = self.client.invoke_async_job(model_id, request, output_uri).await?;
        info!(invocation_arn = %handle.invocation_arn, "video job submitted");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payloads::{ImageGenerationConfig, VideoGenerationConfig};
    use crate::test_support::FakeRuntime;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_generate_text_sends_system_prompt() {
        let runtime = Arc::new(FakeRuntime::new());
        let service = GenerationService::new(ModelClient::new(runtime.clone()));

        let response = service
            .generate_text(
                "anthropic.claude-3-5-sonnet-20240620-v1:0",
                Some("You are an AI assistant."),
                "How many states?",
                &InferenceConfig::new(0.0, 100),
            )
            .await
            .unwrap();

        assert_eq!(response.text, "echo: How many states?");
        let requests = runtime.converse_requests();
        assert_eq!(requests[0].system_prompt.as_deref(), Some("You are an AI assistant."));
        assert_eq!(requests[0].config.max_tokens, 100);
    }

    #[tokio::test]
    async fn test_generate_images_decodes_payload() {
        let encoded = STANDARD.encode(b"png-bytes");
        let runtime = Arc::new(FakeRuntime::new().with_invoke(move |_, _| {
            Ok(format!(r#"{{"images": ["{encoded}"]}}"#).into_bytes())
        }));
        let service = GenerationService::new(ModelClient::new(runtime.clone()));
        let request = TitanImageRequest::new(
            "a cat",
            ImageGenerationConfig {
                number_of_images: 1,
                quality: "standard".to_string(),
                cfg_scale: 8.0,
                height: 512,
                width: 512,
                seed: 7,
            },
        );

        let images = service
            .generate_images("amazon.titan-image-generator-v2:0", &request)
            .await
            .unwrap();

        assert_eq!(images, vec![b"png-bytes".to_vec()]);
        assert_eq!(runtime.invoke_bodies()[0]["imageGenerationConfig"]["seed"], 7);
    }

    #[tokio::test]
    async fn test_start_video_returns_handle() {
        let runtime = Arc::new(FakeRuntime::new());
        let service = GenerationService::new(ModelClient::new(runtime.clone()));
        let request = NovaReelRequest::new(
            "tiger",
            VideoGenerationConfig {
                duration_seconds: 6,
                fps: 24,
                dimension: "1280x720".to_string(),
                seed: 1,
            },
        );

        let handle = service
            .start_video("amazon.nova-reel-v1:0", &request, "s3://bucket")
            .await
            .unwrap();

        assert_eq!(handle.invocation_arn, "arn:fake:async-invoke/1");
        let jobs = runtime.job_requests();
        assert_eq!(jobs[0].2, "s3://bucket");
        assert_eq!(jobs[0].1["taskType"], "TEXT_VIDEO");
    }
}
