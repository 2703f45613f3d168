//! One conversation: transcript plus the LLM client that answers it.

use llm_client::LlmClient;
use prompt::ChatMessage;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::transcript::ChatTranscript;
use crate::core::{BotError, Result};

/// Maintains a transcript and sends it, in full, with every request.
pub struct ConversationSession {
    transcript: ChatTranscript,
    llm_client: Arc<dyn LlmClient>,
    max_turns: Option<usize>,
}

impl ConversationSession {
    pub fn new(llm_client: Arc<dyn LlmClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            transcript: ChatTranscript::new(system_prompt),
            llm_client,
            max_turns: None,
        }
    }

    /// Keeps at most `max_turns` non-system turns after each exchange. `None` is unbounded.
    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Appends `user_text`, requests one completion for the whole transcript, appends the
    /// reply and returns it.
    ///
    /// On failure the user turn is removed again and [`BotError::Upstream`] is returned.
    #[instrument(skip(self, user_text), fields(turns = self.transcript.len()))]
    pub async fn send(&mut self, user_text: &str) -> Result<String> {
        self.transcript.push_user(user_text);
        let messages: Vec<ChatMessage> = self.transcript.turns().to_vec();

        match self.llm_client.get_llm_response_with_messages(messages).await {
            Ok(reply) => {
                self.transcript.push_assistant(reply.clone());
                if let Some(max) = self.max_turns {
                    self.transcript.trim_to(max);
                }
                info!(
                    reply_len = reply.len(),
                    turns = self.transcript.len(),
                    "Conversation reply received"
                );
                Ok(reply)
            }
            Err(e) => {
                self.transcript.pop();
                warn!(error = %e, "Chat completion failed");
                Err(BotError::Upstream(e.to_string()))
            }
        }
    }

    /// Truncates the transcript back to the system turn.
    pub fn reset(&mut self) {
        self.transcript.reset();
        info!("Conversation reset");
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.transcript.turns()
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}
