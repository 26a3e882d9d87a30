//! Recording stand-in for the hosted model runtime.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::{
    ports::ModelRuntime, DomainError, InferenceRequest, InferenceResponse, MessageRole,
};

type InvokeFn = dyn Fn(&str, &Value) -> Result<Vec<u8>, DomainError> + Send + Sync;

pub(crate) struct FakeRuntime {
    invoke_fn: Box<InvokeFn>,
    calls: AtomicUsize,
    converse_log: Mutex<Vec<InferenceRequest>>,
    invoke_log: Mutex<Vec<(String, Value)>>,
    job_log: Mutex<Vec<(String, Value, String)>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self {
            invoke_fn: Box::new(default_invoke),
            calls: AtomicUsize::new(0),
            converse_log: Mutex::new(Vec::new()),
            invoke_log: Mutex::new(Vec::new()),
            job_log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_invoke<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Vec<u8>, DomainError> + Send + Sync + 'static,
    {
        self.invoke_fn = Box::new(f);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn converse_requests(&self) -> Vec<InferenceRequest> {
        self.converse_log.lock().unwrap().clone()
    }

    pub fn invoke_bodies(&self) -> Vec<Value> {
        self.invoke_log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn job_requests(&self) -> Vec<(String, Value, String)> {
        self.job_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelRuntime for FakeRuntime {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.converse_log.lock().unwrap().push(request.clone());

        let last = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(InferenceResponse::text(format!("echo: {last}")))
    }

    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body: Value = serde_json::from_slice(&body).unwrap();
        self.invoke_log
            .lock()
            .unwrap()
            .push((model_id.to_string(), body.clone()));
        (self.invoke_fn)(model_id, &body)
    }

    async fn start_async_invoke(
        &self,
        model_id: &str,
        model_input: Value,
        output_uri: &str,
    ) -> Result<Vec<u8>, DomainError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.job_log
            .lock()
            .unwrap()
            .push((model_id.to_string(), model_input, output_uri.to_string()));
        Ok(format!(r#"{{"invocationArn": "arn:fake:async-invoke/{n}"}}"#).into_bytes())
    }
}

fn default_invoke(_model_id: &str, body: &Value) -> Result<Vec<u8>, DomainError> {
    if let Some(messages) = body["messages"].as_array() {
        let last = messages
            .last()
            .and_then(|m| m["content"].as_str())
            .unwrap_or_default();
        return Ok(claude_body(&format!("echo: {last}")));
    }
    if let Some(text) = body["inputText"].as_str() {
        return Ok(embedding_body(&keyword_embedding(text)));
    }
    Err(DomainError::model("unsupported payload"))
}

pub(crate) fn claude_body(text: &str) -> Vec<u8> {
    serde_json::json!({
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 1, "output_tokens": 1 }
    })
    .to_string()
    .into_bytes()
}

pub(crate) fn embedding_body(vector: &[f32]) -> Vec<u8> {
    serde_json::json!({ "embedding": vector, "inputTextTokenCount": 1 })
        .to_string()
        .into_bytes()
}

/// Counts of a few keywords: texts about the same animal land close together.
pub(crate) fn keyword_embedding(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    ["cat", "dog", "bird"]
        .iter()
        .map(|k| lower.matches(k).count() as f32)
        .collect()
}
