//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use image_generation_client::ImageGenerationError;
use thiserror::Error;

/// Top-level error (upstream AI services, image download, string lookup, transport, handler, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    /// Chat, image or speech endpoint failed or answered with an unexpected shape.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Fetching a generated image failed (non-200 or undecodable body).
    #[error("Download error: {0}")]
    Download(String),

    /// Localized string not found for the requested language or key.
    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ImageGenerationError> for BotError {
    fn from(e: ImageGenerationError) -> Self {
        match e {
            ImageGenerationError::Upstream(m) => BotError::Upstream(m),
            ImageGenerationError::Download(m) => BotError::Download(m),
            ImageGenerationError::Io(e) => BotError::Io(e),
        }
    }
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Unauthorized access")]
    Unauthorized,
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
