//! # Handler chain
//!
//! Runs a sequence of handlers. Each handler has optional before/handle/after: all before run in
//! order (any false stops the chain); then handle runs until Stop or Reply; then all after run in reverse.

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        for h in &self.handlers {
            if !h.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = h.name(),
                    "step: before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let response = h.handle(message).await?;
            debug!(handler = h.name(), response = ?response, "Handler processed");
            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                info!(
                    user_id = message.user.id,
                    handler = h.name(),
                    "step: handler chain stopped by handler"
                );
                final_response = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        Ok(final_response)
    }

    /// Runs the chain and delivers a `Reply` to the chat. Chain errors are logged, not returned,
    /// so one failing update never affects the next.
    pub async fn process(&self, bot: &dyn Bot, message: &Message) {
        match self.handle(message).await {
            Ok(HandlerResponse::Reply(text)) => {
                if let Err(e) = bot.reply_to(message, &text).await {
                    error!(error = %e, chat_id = message.chat.id, "Failed to send reply");
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(
                    error = %e,
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    "Handler chain failed"
                );
            }
        }
    }
}
