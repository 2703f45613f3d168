//! Conversions from teloxide types to core [`User`] and [`Message`].

use crate::core::{Chat, Message, MessageKind, ToCoreMessage, ToCoreUser, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            language_code: self.0.language_code.clone(),
        }
    }
}

/// Telegram message to core message.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    fn kind(&self) -> MessageKind {
        if let Some(voice) = self.0.voice() {
            MessageKind::Voice {
                file_id: voice.file.id.0.clone(),
            }
        } else if let Some(audio) = self.0.audio() {
            MessageKind::Audio {
                file_id: audio.file.id.0.clone(),
            }
        } else if self.0.text().is_some() {
            MessageKind::Text
        } else {
            MessageKind::Other
        }
    }
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                    language_code: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: if self.0.chat.is_private() {
                    "private".to_string()
                } else {
                    "group".to_string()
                },
            },
            content: self
                .0
                .text()
                .or_else(|| self.0.caption())
                .unwrap_or("")
                .to_string(),
            kind: self.kind(),
            created_at: self.0.date,
        }
    }
}
