use async_trait::async_trait;
use bedrock_playground::cli::{run_chat, run_qa, AppContext};
use bedrock_playground::domain::{
    ports::ModelRuntime, DomainError, InferenceRequest, InferenceResponse,
};
use bedrock_playground::infrastructure::AppConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replies to Claude message bodies by counting turns, embeds Titan bodies as
/// keyword counts, and records every Converse prompt.
#[derive(Default)]
struct ScriptedRuntime {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedRuntime {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelRuntime for ScriptedRuntime {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);
        Ok(InferenceResponse::text(format!(
            "answer from {} message(s)",
            request.messages.len()
        )))
    }

    async fn invoke_model(&self, _model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body: Value = serde_json::from_slice(&body).unwrap();

        if let Some(text) = body["inputText"].as_str() {
            let lower = text.to_lowercase();
            let vector: Vec<f32> = ["rust", "python", "garden"]
                .iter()
                .map(|k| lower.matches(k).count() as f32)
                .collect();
            return Ok(json!({ "embedding": vector }).to_string().into_bytes());
        }

        let turns = body["messages"].as_array().map(|m| m.len()).unwrap_or(0);
        Ok(json!({
            "content": [{ "type": "text", "text": format!("reply to {turns} turn(s)") }],
            "stop_reason": "end_turn"
        })
        .to_string()
        .into_bytes())
    }

    async fn start_async_invoke(
        &self,
        _model_id: &str,
        _model_input: Value,
        _output_uri: &str,
    ) -> Result<Vec<u8>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(br#"{"invocationArn": "arn:test"}"#.to_vec())
    }
}

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn context(runtime: Arc<ScriptedRuntime>) -> AppContext {
    let config = AppConfig::from_yaml("config:\n  rag:\n    embedding_dimension: 3\n").unwrap();
    AppContext::bootstrap(
        config,
        env(&[("ACCESS_KEY", "AK"), ("SECRET_KEY", "SK")]),
        move |_| runtime,
    )
    .unwrap()
}

#[test]
fn missing_credentials_never_build_a_client() {
    let connected = AtomicUsize::new(0);
    let result = AppContext::bootstrap(AppConfig::default(), env(&[("ACCESS_KEY", "AK")]), |_| {
        connected.fetch_add(1, Ordering::SeqCst);
        Arc::new(ScriptedRuntime::default())
    });

    assert!(matches!(result, Err(DomainError::Configuration(_))));
    assert_eq!(connected.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chat_session_resends_full_history() {
    let runtime = Arc::new(ScriptedRuntime::default());
    let ctx = context(runtime.clone());
    let mut session = ctx.chat_session();
    let mut out = Vec::new();

    run_chat(&mut session, "one\ntwo\nthree\nquit\n".as_bytes(), &mut out)
        .await
        .unwrap();

    assert_eq!(session.history().len(), 6);
    assert_eq!(runtime.calls(), 3);

    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("Claude: reply to 1 turn(s)"));
    assert!(transcript.contains("Claude: reply to 5 turn(s)"));
}

#[tokio::test]
async fn rag_pipeline_answers_from_closest_chunks() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    write!(
        file,
        "Rust ownership and borrowing.\x0cPython scripting notes.\x0cGarden planting calendar.\x0cRust async runtimes and Rust traits."
    )
    .unwrap();

    let runtime = Arc::new(ScriptedRuntime::default());
    let ctx = context(runtime.clone());

    let (document, chunks) = ctx.document_service().ingest(file.path()).await.unwrap();
    assert_eq!(document.page_count(), 4);
    assert_eq!(chunks.len(), 4);

    let qa = ctx.qa_service(&chunks).await.unwrap();
    let answer = qa.answer("Tell me about rust", 3).await.unwrap();

    assert_eq!(answer.sources.len(), 3);
    assert!(answer
        .sources
        .windows(2)
        .all(|pair| pair[0].distance <= pair[1].distance));
    assert_eq!(answer.sources[0].chunk.metadata.page, Some(1));

    let prompts = runtime.prompts.lock().unwrap();
    let prompt = &prompts[0];
    assert!(prompt.contains("Document (Page 1):\nRust ownership and borrowing."));
    assert!(prompt.contains("Tell me about rust"));
}

#[tokio::test]
async fn question_loop_over_empty_document_still_answers() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();

    let runtime = Arc::new(ScriptedRuntime::default());
    let ctx = context(runtime.clone());
    let (_, chunks) = ctx.document_service().ingest(file.path()).await.unwrap();
    assert!(chunks.is_empty());

    let qa = ctx.qa_service(&chunks).await.unwrap();
    let mut out = Vec::new();
    run_qa(&qa, "anything there?\nquit\n".as_bytes(), &mut out)
        .await
        .unwrap();

    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("Answer: answer from 1 message(s)"));
    assert_eq!(runtime.calls(), 1);

    let prompts = runtime.prompts.lock().unwrap();
    let prompt = &prompts[0];
    assert!(prompt.contains("(no relevant document excerpts were found)"));
}
