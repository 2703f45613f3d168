//! `/imagine <prompt>`: text-to-image, sent back as a photo.

use async_trait::async_trait;
use image_generation_client::{generate_to_file, ImageGenerator, RetryPolicy};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{command_of, remove_temp_file};
use crate::core::{Bot, BotError, ChatAction, Handler, HandlerResponse, Message, Result};

const USAGE: &str = "Usage: /imagine <description of the image>";

/// Generates an image for the prompt, stores it in a per-message temp file and sends it.
/// Failures after the last retry are answered with the error text.
pub struct ImagineHandler {
    bot: Arc<dyn Bot>,
    generator: Arc<dyn ImageGenerator>,
    http: reqwest::Client,
    tmp_dir: PathBuf,
    retry: RetryPolicy,
}

impl ImagineHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        generator: Arc<dyn ImageGenerator>,
        http: reqwest::Client,
        tmp_dir: PathBuf,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            bot,
            generator,
            http,
            tmp_dir,
            retry,
        }
    }

    /// Temp file a single generated image is written to. Unique per message, so two
    /// /imagine requests in one chat never send each other's picture.
    pub fn image_path(tmp_dir: &Path, chat_id: i64, message_id: &str) -> PathBuf {
        tmp_dir.join(format!("image_{}_{}.jpg", chat_id, message_id))
    }
}

#[async_trait]
impl Handler for ImagineHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let prompt = match command_of(message) {
            Some(cmd) if cmd.name == "imagine" => cmd.args,
            _ => return Ok(HandlerResponse::Continue),
        };
        if prompt.is_empty() {
            return Ok(HandlerResponse::Reply(USAGE.to_string()));
        }

        self.bot
            .send_chat_action(&message.chat, ChatAction::UploadPhoto)
            .await?;

        let path = Self::image_path(&self.tmp_dir, message.chat.id, &message.id);
        let generated = generate_to_file(
            self.generator.as_ref(),
            &self.http,
            &prompt,
            &path,
            &self.retry,
        )
        .await;

        match generated {
            Ok(()) => {
                info!(chat_id = message.chat.id, "Sending generated image");
                let sent = self.bot.send_photo(&message.chat, &path).await;
                remove_temp_file(&path).await;
                sent?;
                Ok(HandlerResponse::Stop)
            }
            Err(e) => {
                remove_temp_file(&path).await;
                let e = BotError::from(e);
                warn!(error = %e, chat_id = message.chat.id, "Image generation failed");
                Ok(HandlerResponse::Reply(e.to_string()))
            }
        }
    }
}
