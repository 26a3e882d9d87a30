use tracing::{debug, instrument};

use crate::application::client::ModelClient;
use crate::domain::{payloads::ClaudeMessagesRequest, Conversation, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
    Ended,
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
}

/// Multi-turn chat with memory.
///
/// Every call carries the complete history, so the request grows with each
/// turn for as long as the session lives; only [`ChatSession::clear`] shrinks
/// it. A failed call leaves the unanswered user turn in the history; the next
/// request merges it with the new input.
pub struct ChatSession {
    client: ModelClient,
    settings: ChatSettings,
    history: Conversation,
    state: SessionState,
}

impl ChatSession {
    pub fn new(client: ModelClient, settings: ChatSettings) -> Self {
        Self {
            client,
            settings,
            history: Conversation::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    #[instrument(skip(self, input), fields(session = %self.history.id, history = self.history.len()))]
    pub async fn send(&mut self, input: &str) -> Result<String, DomainError> {
        if self.state == SessionState::Ended {
            return Err(DomainError::validation("chat session has ended"));
        }

        self.state = SessionState::AwaitingResponse;
        self.history.push_user(input);

        let payload = ClaudeMessagesRequest::new(self.history.request_messages(), self.settings.max_tokens)
            .with_system(self.settings.system_prompt.clone())
            .with_temperature(self.settings.temperature);

        let result = self.client.invoke(&self.settings.model_id, &payload).await;
        self.state = SessionState::Idle;

        let response = result?;
        debug!(usage = ?response.usage, "assistant replied");
        self.history.push_assistant(response.text.clone());
        Ok(response.text)
    }

    /// Empties the history. An ended session stays ended.
    pub fn clear(&mut self) {
        self.history.clear();
        if self.state != SessionState::Ended {
            self.state = SessionState::Idle;
        }
    }

    pub fn end(&mut self) {
        self.state = SessionState::Ended;
    }
}
