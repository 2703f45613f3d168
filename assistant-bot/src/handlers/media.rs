//! `/restart` and `/pipe`: canned media from the assets directory.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::command_of;
use crate::core::{Bot, ChatAction, Handler, HandlerResponse, Message, Result};
use crate::session::SessionStore;

/// Photo sent after a conversation restart, relative to the assets directory.
pub const RESTART_PHOTO_FILE: &str = "ah shit.jpg";
/// Video sent for `/pipe`, relative to the assets directory.
pub const PIPE_VIDEO_FILE: &str = "pipe.mp4";

/// Resets the caller's conversation and answers with the restart photo.
pub struct RestartHandler {
    bot: Arc<dyn Bot>,
    sessions: Arc<SessionStore>,
    photo_path: PathBuf,
}

impl RestartHandler {
    pub fn new(bot: Arc<dyn Bot>, sessions: Arc<SessionStore>, photo_path: PathBuf) -> Self {
        Self {
            bot,
            sessions,
            photo_path,
        }
    }
}

#[async_trait]
impl Handler for RestartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match command_of(message) {
            Some(cmd) if cmd.name == "restart" => {}
            _ => return Ok(HandlerResponse::Continue),
        }
        let existed = self.sessions.reset(message.chat.id).await;
        info!(chat_id = message.chat.id, existed, "Conversation restarted");

        if !self.photo_path.is_file() {
            warn!(path = %self.photo_path.display(), "Restart photo missing");
            return Ok(HandlerResponse::Reply("Conversation restarted.".to_string()));
        }
        self.bot
            .send_chat_action(&message.chat, ChatAction::UploadPhoto)
            .await?;
        self.bot.send_photo(&message.chat, &self.photo_path).await?;
        Ok(HandlerResponse::Stop)
    }
}

/// Answers `/pipe` with the pipe video.
pub struct PipeHandler {
    bot: Arc<dyn Bot>,
    video_path: PathBuf,
}

impl PipeHandler {
    pub fn new(bot: Arc<dyn Bot>, video_path: PathBuf) -> Self {
        Self { bot, video_path }
    }
}

#[async_trait]
impl Handler for PipeHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match command_of(message) {
            Some(cmd) if cmd.name == "pipe" => {}
            _ => return Ok(HandlerResponse::Continue),
        }
        self.bot
            .send_chat_action(&message.chat, ChatAction::UploadVideo)
            .await?;
        self.bot.send_video(&message.chat, &self.video_path).await?;
        Ok(HandlerResponse::Stop)
    }
}
