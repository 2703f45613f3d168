//! `/start` and `/help`: localized strings from the [`Translator`].

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use super::command_of;
use crate::core::{Handler, HandlerResponse, Message, Result};
use crate::translator::Translator;

/// Language used when the client reports none.
pub const DEFAULT_LANGUAGE: &str = "en";

fn language_of(message: &Message) -> String {
    message
        .user
        .language_code
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Greets the user: `"<localized start>, <full name>"`.
pub struct StartHandler {
    translator: Arc<Translator>,
}

impl StartHandler {
    pub fn new(translator: Arc<Translator>) -> Self {
        Self { translator }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match command_of(message) {
            Some(cmd) if cmd.name == "start" => {}
            _ => return Ok(HandlerResponse::Continue),
        }
        let greeting = self
            .translator
            .get_message(&language_of(message), "start")?;
        Ok(HandlerResponse::Reply(format!(
            "{}, {}",
            greeting,
            message.user.full_name()
        )))
    }
}

/// Replies with the localized help text.
pub struct HelpHandler {
    translator: Arc<Translator>,
}

impl HelpHandler {
    pub fn new(translator: Arc<Translator>) -> Self {
        Self { translator }
    }
}

#[async_trait]
impl Handler for HelpHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match command_of(message) {
            Some(cmd) if cmd.name == "help" => {}
            _ => return Ok(HandlerResponse::Continue),
        }
        let help = self.translator.get_message(&language_of(message), "help")?;
        Ok(HandlerResponse::Reply(help.to_string()))
    }
}
