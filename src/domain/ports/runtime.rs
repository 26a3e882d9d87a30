use async_trait::async_trait;

use crate::domain::{errors::DomainError, InferenceRequest, InferenceResponse};

/// Hosted model endpoint. Every call is a single billable round trip: no
/// retries happen behind this trait.
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// Model-agnostic chat call.
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, DomainError>;

    /// Sends a model-specific JSON body and returns the model-specific JSON body.
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError>;

    /// Submits a long-running job writing its results to `output_uri`.
    /// Returns the JSON job descriptor (`{"invocationArn": ...}`).
    async fn start_async_invoke(
        &self,
        model_id: &str,
        model_input: serde_json::Value,
        output_uri: &str,
    ) -> Result<Vec<u8>, DomainError>;
}
