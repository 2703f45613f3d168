//! Request logging and the optional user allowlist.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::core::{Handler, HandlerError, HandlerResponse, Message, MessageKind, Result};

use super::command_of;

/// Longest content prefix written to the log.
const PREVIEW_CHARS: usize = 80;

/// What the message asks the bot to do: `/imagine`, `voice`, `audio`, `talk` or `other`.
fn request_of(message: &Message) -> String {
    if let Some(cmd) = command_of(message) {
        return format!("/{}", cmd.name);
    }
    match message.kind {
        MessageKind::Text => "talk".to_string(),
        MessageKind::Voice { .. } => "voice".to_string(),
        MessageKind::Audio { .. } => "audio".to_string(),
        MessageKind::Other => "other".to_string(),
    }
}

/// First [`PREVIEW_CHARS`] characters of the content, with `…` when cut.
fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

fn outcome_of(response: &HandlerResponse) -> (&'static str, Option<usize>) {
    match response {
        HandlerResponse::Reply(text) => ("reply", Some(text.chars().count())),
        HandlerResponse::Stop => ("sent media", None),
        HandlerResponse::Continue | HandlerResponse::Ignore => ("ignored", None),
    }
}

/// Logs what each update asks for on the way in and what the bot did on the way out.
/// Never stops the chain.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            chat_id = message.chat.id,
            chat_type = %message.chat.chat_type,
            user_id = message.user.id,
            language = message.user.language_code.as_deref().unwrap_or("-"),
            request = %request_of(message),
            file_id = message.kind.audio_file_id().unwrap_or("-"),
            preview = %preview(&message.content),
            "Incoming request"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let (outcome, reply_chars) = outcome_of(response);
        debug!(
            chat_id = message.chat.id,
            message_id = %message.id,
            request = %request_of(message),
            outcome,
            reply_chars = ?reply_chars,
            "Request finished"
        );
        Ok(())
    }
}

/// Fails the chain with Unauthorized when the sender is not in the allowlist.
/// An empty allowlist lets everyone through.
pub struct AuthHandler {
    allowed_users: Vec<i64>,
}

impl AuthHandler {
    /// Creates a handler that allows only the given user ids.
    pub fn new(allowed_users: Vec<i64>) -> Self {
        Self { allowed_users }
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user_id = message.user.id;
        if self.allowed_users.is_empty() || self.allowed_users.contains(&user_id) {
            Ok(true)
        } else {
            warn!(
                user_id,
                chat_id = message.chat.id,
                request = %request_of(message),
                "Rejected request from user outside the allowlist"
            );
            Err(HandlerError::Unauthorized.into())
        }
    }
}
