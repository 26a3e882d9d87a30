use async_trait::async_trait;
use aws_sdk_bedrockruntime::config::{BehaviorVersion, Credentials as AwsCredentials, Region};
use aws_sdk_bedrockruntime::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::{
    AsyncInvokeOutputDataConfig, AsyncInvokeS3OutputDataConfig, ContentBlock, ConversationRole,
    InferenceConfiguration, Message as BedrockMessage, SystemContentBlock,
};
use aws_sdk_bedrockruntime::Client;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::retry::RetryConfig;
use tracing::debug;

use super::document::json_to_document;
use crate::domain::{
    ports::ModelRuntime, DomainError, InferenceConfig, InferenceRequest, InferenceResponse,
    Message, MessageRole, TokenUsage,
};
use crate::infrastructure::credentials::Credentials;

/// Service error codes that mean the caller could not be authenticated.
const AUTH_ERROR_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "AccessDeniedException",
    "ExpiredTokenException",
    "MissingAuthenticationTokenException",
];

pub struct BedrockRuntime {
    client: Client,
}

impl BedrockRuntime {
    /// Static credentials, explicit region, SDK retries off.
    pub fn new(credentials: &Credentials) -> Self {
        let aws_credentials = AwsCredentials::new(
            credentials.access_key.clone(),
            credentials.secret_key.clone(),
            None,
            None,
            "environment",
        );

        let config = aws_sdk_bedrockruntime::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(aws_credentials)
            .retry_config(RetryConfig::disabled())
            .build();

        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl ModelRuntime for BedrockRuntime {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, DomainError> {
        let mut call = self
            .client
            .converse()
            .model_id(&request.model_id)
            .inference_config(inference_configuration(&request.config));

        if let Some(system) = &request.system_prompt {
            call = call.system(SystemContentBlock::Text(system.clone()));
        }
        for message in &request.messages {
            call = call.messages(to_bedrock_message(message)?);
        }

        let output = call.send().await.map_err(map_sdk_error)?;

        let text = output
            .output()
            .and_then(|o| o.as_message().ok())
            .map(|m| {
                m.content()
                    .iter()
                    .filter_map(|block| block.as_text().ok())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| DomainError::parse("converse response contained no text"))?;

        let usage = output.usage().map(|u| TokenUsage {
            input_tokens: u.input_tokens().max(0) as u32,
            output_tokens: u.output_tokens().max(0) as u32,
        });

        Ok(InferenceResponse {
            text,
            stop_reason: Some(output.stop_reason().as_str().to_string()),
            usage,
        })
    }

    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(output.body().as_ref().to_vec())
    }

    async fn start_async_invoke(
        &self,
        model_id: &str,
        model_input: serde_json::Value,
        output_uri: &str,
    ) -> Result<Vec<u8>, DomainError> {
        let s3 = AsyncInvokeS3OutputDataConfig::builder()
            .s3_uri(output_uri)
            .build()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let output = self
            .client
            .start_async_invoke()
            .model_id(model_id)
            .model_input(json_to_document(model_input))
            .output_data_config(AsyncInvokeOutputDataConfig::S3OutputDataConfig(s3))
            .send()
            .await
            .map_err(map_sdk_error)?;

        debug!(invocation_arn = ?output.invocation_arn(), "async invoke accepted");

        serde_json::to_vec(&serde_json::json!({ "invocationArn": output.invocation_arn() }))
            .map_err(|e| DomainError::internal(e.to_string()))
    }
}

fn inference_configuration(config: &InferenceConfig) -> InferenceConfiguration {
    let stop_sequences = (!config.stop_sequences.is_empty()).then(|| config.stop_sequences.clone());

    InferenceConfiguration::builder()
        .temperature(config.temperature)
        .max_tokens(i32::try_from(config.max_tokens).unwrap_or(i32::MAX))
        .set_top_p(config.top_p)
        .set_stop_sequences(stop_sequences)
        .build()
}

fn to_bedrock_message(message: &Message) -> Result<BedrockMessage, DomainError> {
    let role = match message.role {
        MessageRole::User => ConversationRole::User,
        MessageRole::Assistant => ConversationRole::Assistant,
    };

    BedrockMessage::builder()
        .role(role)
        .content(ContentBlock::Text(message.content.clone()))
        .build()
        .map_err(|e| DomainError::internal(e.to_string()))
}

/// Service rejections become `Model` errors carrying the service message,
/// except authentication failures, which join network and dispatch failures
/// as `Transport` errors.
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> DomainError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let SdkError::ServiceError(service) = &err {
        let inner = service.err();
        let code = inner.code().unwrap_or("Unknown");
        let message = inner
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| inner.to_string());

        if AUTH_ERROR_CODES.contains(&code) {
            return DomainError::transport(format!("{code}: {message}"));
        }
        return DomainError::model(message);
    }

    DomainError::transport(DisplayErrorContext(&err).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockruntime::operation::converse::ConverseError;
    use aws_smithy_types::error::metadata::ErrorMetadata;

    fn service_error(code: &str, message: &str) -> SdkError<ConverseError, ()> {
        let meta = ErrorMetadata::builder().code(code).message(message).build();
        SdkError::service_error(ConverseError::generic(meta), ())
    }

    #[test]
    fn test_service_rejection_keeps_message() {
        let err = map_sdk_error(service_error(
            "ValidationException",
            "The provided model identifier is invalid.",
        ));
        match err {
            DomainError::Model(msg) => assert_eq!(msg, "The provided model identifier is invalid."),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_auth_failure_is_transport() {
        let err = map_sdk_error(service_error(
            "UnrecognizedClientException",
            "The security token included in the request is invalid.",
        ));
        match err {
            DomainError::Transport(msg) => assert!(msg.starts_with("UnrecognizedClientException")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_timeout_is_transport() {
        let err: SdkError<ConverseError, ()> = SdkError::timeout_error("deadline elapsed");
        assert!(matches!(map_sdk_error(err), DomainError::Transport(_)));
    }

    #[test]
    fn test_inference_configuration_mapping() {
        let mut config = InferenceConfig::new(0.2, 100);
        config.top_p = Some(0.9);

        let mapped = inference_configuration(&config);
        assert_eq!(mapped.max_tokens(), Some(100));
        assert_eq!(mapped.temperature(), Some(0.2));
        assert_eq!(mapped.top_p(), Some(0.9));
        assert!(mapped.stop_sequences().is_empty());
    }

    #[test]
    fn test_message_roles() {
        let user = to_bedrock_message(&Message::user("hi")).unwrap();
        assert_eq!(user.role(), &ConversationRole::User);

        let assistant = to_bedrock_message(&Message::assistant("hello")).unwrap();
        assert_eq!(assistant.role(), &ConversationRole::Assistant);
        assert_eq!(assistant.content()[0].as_text().unwrap(), "hello");
    }
}
