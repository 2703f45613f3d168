//! Message types for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// What the message carries besides its text. Voice and audio keep the transport file id
/// so a handler can download the recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Text,
    Voice { file_id: String },
    Audio { file_id: String },
    Other,
}

impl MessageKind {
    /// File id of a voice note or audio file.
    pub fn audio_file_id(&self) -> Option<&str> {
        match self {
            MessageKind::Voice { file_id } | MessageKind::Audio { file_id } => Some(file_id),
            _ => None,
        }
    }
}

/// A single incoming message with user, chat, content, and kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Text or caption; empty for voice notes.
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}
