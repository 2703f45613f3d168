//! Bot abstraction for replying in a chat.
//!
//! [`Bot`] is transport-agnostic; `telegram::TelegramBotAdapter` implements it via teloxide and
//! tests substitute recording mocks.

use crate::core::error::{BotError, Result};
use crate::core::types::{Chat, Message};
use async_trait::async_trait;
use std::path::Path;

/// Chat action indicator shown to the user while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    UploadVideo,
}

/// Abstraction for sending to a chat. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a text reply to the given message (same chat, quoting it when the transport can).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Shows a chat action indicator (typing, uploading photo/video).
    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()>;
    /// Sends a local image file as a photo.
    async fn send_photo(&self, chat: &Chat, path: &Path) -> Result<()>;
    /// Sends a local video file.
    async fn send_video(&self, chat: &Chat, path: &Path) -> Result<()>;
    /// Downloads a transport file (voice note, audio) to `dest`.
    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()>;
}

/// Parses a message id string into an i32 (Telegram message ids).
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Bot(format!("Invalid message_id: {}", s)))
}
