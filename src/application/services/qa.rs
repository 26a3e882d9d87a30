use std::sync::Arc;
use tracing::{info, instrument};

use super::rag::RagService;
use crate::application::client::ModelClient;
use crate::domain::{DomainError, InferenceConfig, InferenceRequest, Message, SearchResult};

pub const DEFAULT_QA_TEMPLATE: &str = "I need you to answer a question based on the following document excerpts.

Context:
{context}

Question: {question}

Please provide a comprehensive answer based only on the information in these document excerpts. If the answer is not contained in the provided context, please state that you don't have enough information to answer accurately.";

pub const DEFAULT_NO_CONTEXT: &str = "(no relevant document excerpts were found)";

#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SearchResult>,
}

/// Answers questions about an indexed document: retrieve, fill the prompt
/// template, ask the model.
pub struct QaService {
    rag: Arc<RagService>,
    client: ModelClient,
    model_id: String,
    inference: InferenceConfig,
    template: String,
    no_context: String,
}

impl QaService {
    pub fn new(
        rag: Arc<RagService>,
        client: ModelClient,
        model_id: impl Into<String>,
        inference: InferenceConfig,
    ) -> Self {
        Self {
            rag,
            client,
            model_id: model_id.into(),
            inference,
            template: DEFAULT_QA_TEMPLATE.to_string(),
            no_context: DEFAULT_NO_CONTEXT.to_string(),
        }
    }

    pub fn with_prompt(mut self, template: impl Into<String>, no_context: impl Into<String>) -> Self {
        self.template = template.into();
        self.no_context = no_context.into();
        self
    }

    pub fn default_top_k(&self) -> usize {
        self.rag.default_top_k()
    }

    #[instrument(skip(self))]
    pub async fn answer(&self, question: &str, top_k: usize) -> Result<Answer, DomainError> {
        let sources = self.rag.retrieve_top_k(question, top_k).await?;
        info!(sources = sources.len(), "context retrieved");

        let context = if sources.is_empty() {
            self.no_context.clone()
        } else {
            format_context(&sources)
        };
        let prompt = render(&self.template, &[("context", &context), ("question", question)]);

        let request = InferenceRequest::new(
            &self.model_id,
            vec![Message::user(prompt)],
            self.inference.clone(),
        );
        let response = self.client.converse(&request).await?;

        Ok(Answer {
            text: response.text,
            sources,
        })
    }
}

/// Excerpts separated by blank lines, each labelled with its page when the
/// chunk has one and with a bare `Document:` otherwise.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| match r.chunk.metadata.page {
            Some(page) => format!("Document (Page {page}):\n{}", r.chunk.content),
            None => format!("Document:\n{}", r.chunk.content),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Substitutes `{name}` placeholders in one pass, so substituted text is
/// never scanned again.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let replaced = tail.find('}').and_then(|close| {
            let name = &tail[1..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
