//! Voice notes and audio files: transcribed, then answered like text.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use transcription_client::SpeechToText;

use super::remove_temp_file;
use crate::core::{Bot, BotError, ChatAction, Handler, HandlerResponse, Message, Result};
use crate::session::SessionStore;

/// Downloads the recording, transcribes it and sends the transcription through the chat's
/// session.
pub struct VoiceHandler {
    bot: Arc<dyn Bot>,
    speech_to_text: Arc<dyn SpeechToText>,
    sessions: Arc<SessionStore>,
    tmp_dir: PathBuf,
}

impl VoiceHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        speech_to_text: Arc<dyn SpeechToText>,
        sessions: Arc<SessionStore>,
        tmp_dir: PathBuf,
    ) -> Self {
        Self {
            bot,
            speech_to_text,
            sessions,
            tmp_dir,
        }
    }

    /// Temp file a single recording is downloaded to. Unique per message, so overlapping
    /// voice notes in one chat never read each other's audio.
    pub fn voice_path(tmp_dir: &Path, chat_id: i64, message_id: &str) -> PathBuf {
        tmp_dir.join(format!("voice_{}_{}.ogg", chat_id, message_id))
    }

    async fn transcribe(&self, file_id: &str, message: &Message) -> Result<String> {
        let path = Self::voice_path(&self.tmp_dir, message.chat.id, &message.id);
        let text = self.download_and_transcribe(file_id, &path).await;
        remove_temp_file(&path).await;
        let text = text?;
        info!(
            chat_id = message.chat.id,
            text_len = text.len(),
            "Voice message transcribed"
        );
        Ok(text)
    }

    async fn download_and_transcribe(&self, file_id: &str, path: &Path) -> Result<String> {
        self.bot.download_file(file_id, path).await?;
        self.speech_to_text
            .transcribe(path)
            .await
            .map_err(|e| BotError::Upstream(e.to_string()))
    }
}

#[async_trait]
impl Handler for VoiceHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(file_id) = message.kind.audio_file_id() else {
            return Ok(HandlerResponse::Continue);
        };

        self.bot
            .send_chat_action(&message.chat, ChatAction::Typing)
            .await?;

        let text = match self.transcribe(file_id, message).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, chat_id = message.chat.id, "Transcription failed");
                return Ok(HandlerResponse::Reply(e.to_string()));
            }
        };

        let session = self.sessions.session(message.chat.id);
        let mut session = session.lock().await;
        match session.send(&text).await {
            Ok(reply) => Ok(HandlerResponse::Reply(reply)),
            Err(e) => {
                warn!(error = %e, chat_id = message.chat.id, "Voice request failed");
                Ok(HandlerResponse::Reply(e.to_string()))
            }
        }
    }
}
