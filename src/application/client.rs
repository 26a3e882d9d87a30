use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::{
    payloads::ModelPayload, ports::ModelRuntime, DomainError, InferenceRequest,
    InferenceResponse, JobHandle,
};

/// Remote model client shared by every workflow of a process.
///
/// Thin wrapper over a [`ModelRuntime`]: it encodes model-family payloads,
/// decodes their responses and logs the outcome. Failures are handed back
/// untouched; nothing is retried.
#[derive(Clone)]
pub struct ModelClient {
    runtime: Arc<dyn ModelRuntime>,
}

impl ModelClient {
    pub fn new(runtime: Arc<dyn ModelRuntime>) -> Self {
        Self { runtime }
    }

    #[instrument(skip(self, request), fields(model_id = %request.model_id, messages = request.messages.len()))]
    pub async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, DomainError> {
        match self.runtime.converse(request).await {
            Ok(response) => {
                debug!(stop_reason = ?response.stop_reason, usage = ?response.usage, "converse completed");
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "converse failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self, payload), fields(family = P::FAMILY.as_str()))]
    pub async fn invoke<P: ModelPayload>(
        &self,
        model_id: &str,
        payload: &P,
    ) -> Result<P::Output, DomainError> {
        let body = payload.to_body()?;
        debug!(bytes = body.len(), "invoking model");

        let response = self
            .runtime
            .invoke_model(model_id, body)
            .await
            .inspect_err(|e| warn!(error = %e, "invoke failed"))?;

        P::parse_response(&response)
    }

    /// Submits a long-running generation job and returns as soon as the
    /// service accepts it. Completion is not tracked here.
    #[instrument(skip(self, payload), fields(family = P::FAMILY.as_str()))]
    pub async fn invoke_async_job<P>(
        &self,
        model_id: &str,
        payload: &P,
        output_uri: &str,
    ) -> Result<JobHandle, DomainError>
    where
        P: ModelPayload<Output = JobHandle>,
    {
        let model_input = payload.to_value()?;

        let descriptor = self
            .runtime
            .start_async_invoke(model_id, model_input, output_uri)
            .await
            .inspect_err(|e| warn!(error = %e, "job submission failed"))?;

        let handle = P::parse_response(&descriptor)?;
        debug!(invocation_arn = %handle.invocation_arn, "job submitted");
        Ok(handle)
    }
}
