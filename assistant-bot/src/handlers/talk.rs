//! Plain text: forwarded to the chat's conversation session.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::core::{Bot, ChatAction, Handler, HandlerResponse, Message, MessageKind, Result};
use crate::session::SessionStore;

/// Sends non-command text through the chat's session and replies with the model text.
/// Upstream failures are answered with the error text.
pub struct TalkHandler {
    bot: Arc<dyn Bot>,
    sessions: Arc<SessionStore>,
}

impl TalkHandler {
    pub fn new(bot: Arc<dyn Bot>, sessions: Arc<SessionStore>) -> Self {
        Self { bot, sessions }
    }
}

#[async_trait]
impl Handler for TalkHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if message.kind != MessageKind::Text || text.is_empty() || text.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        self.bot
            .send_chat_action(&message.chat, ChatAction::Typing)
            .await?;

        let session = self.sessions.session(message.chat.id);
        let mut session = session.lock().await;
        match session.send(text).await {
            Ok(reply) => Ok(HandlerResponse::Reply(reply)),
            Err(e) => {
                warn!(error = %e, chat_id = message.chat.id, "Talk request failed");
                Ok(HandlerResponse::Reply(e.to_string()))
            }
        }
    }
}
