//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code talks to Telegram;
//! tests substitute another Bot impl.

use crate::core::{parse_message_id, Bot as CoreBot, BotError, Chat, ChatAction, Message, Result};
use async_trait::async_trait;
use std::path::Path;
use teloxide::net::Download;
use teloxide::payloads::SendMessageSetters;
use teloxide::{
    prelude::*,
    types::{ChatId, FileId, InputFile, MessageId, ReplyParameters},
};
use tracing::{debug, instrument};

fn bot_err(e: impl std::fmt::Display) -> BotError {
    BotError::Bot(e.to_string())
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let Ok(id) = parse_message_id(&message.id) else {
            return self.send_message(&message.chat, text).await;
        };
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(id)))
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()> {
        let action = match action {
            ChatAction::Typing => teloxide::types::ChatAction::Typing,
            ChatAction::UploadPhoto => teloxide::types::ChatAction::UploadPhoto,
            ChatAction::UploadVideo => teloxide::types::ChatAction::UploadVideo,
        };
        self.bot
            .send_chat_action(ChatId(chat.id), action)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    #[instrument(skip(self, chat), fields(chat_id = chat.id, path = %path.display()))]
    async fn send_photo(&self, chat: &Chat, path: &Path) -> Result<()> {
        self.bot
            .send_photo(ChatId(chat.id), InputFile::file(path.to_path_buf()))
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    #[instrument(skip(self, chat), fields(chat_id = chat.id, path = %path.display()))]
    async fn send_video(&self, chat: &Chat, path: &Path) -> Result<()> {
        self.bot
            .send_video(ChatId(chat.id), InputFile::file(path.to_path_buf()))
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    #[instrument(skip(self), fields(dest = %dest.display()))]
    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(bot_err)?;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut out = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(&file.path, &mut out)
            .await
            .map_err(|e| BotError::Download(e.to_string()))?;
        debug!(size = file.meta.size, "Telegram file downloaded");
        Ok(())
    }
}
