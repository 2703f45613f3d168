//! AI config: OpenAI-compatible endpoint, models, conversation window and session scope,
//! image retry policy. Loaded from env.

use anyhow::Result;
use image_generation_client::{parse_image_size, ImageSize, RetryPolicy, DEFAULT_IMAGE_MODEL};
use llm_client::DEFAULT_MODEL;
use prompt::DEFAULT_SYSTEM_MESSAGE;
use std::env;
use std::time::Duration;
use transcription_client::DEFAULT_TRANSCRIPTION_MODEL;

use crate::session::SessionScope;

/// Naga API, the default OpenAI-compatible endpoint.
pub const DEFAULT_AI_BASE_URL: &str = "https://api.naga.ac/v1";

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Unset or blank is `None`; anything else must parse.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} is not a valid number: {}", key, raw)),
        _ => Ok(None),
    }
}

/// Smallest window that still keeps one user turn and its reply.
pub const MIN_MAX_TURNS: usize = 2;

/// Everything the chat, image and transcription clients need.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// NAGA_API_KEY or OPENAI_API_KEY
    pub api_key: String,
    /// AI_BASE_URL or OPENAI_BASE_URL
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub image_model: String,
    /// Raw IMAGE_SIZE; checked by validate()
    pub image_size: String,
    pub transcription_model: String,
    /// CONVERSATION_MAX_TURNS; None keeps the whole conversation, otherwise at least 2
    pub max_turns: Option<usize>,
    /// Raw SESSION_SCOPE (`chat` or `shared`); checked by validate()
    pub session_scope: String,
    pub retry_max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("NAGA_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .map_err(|_| anyhow::anyhow!("NAGA_API_KEY (or OPENAI_API_KEY) not set"))?;
        let base_url = env::var("AI_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_AI_BASE_URL.to_string());
        let defaults = RetryPolicy::default();

        Ok(Self {
            api_key,
            base_url,
            model: env_or("MODEL", DEFAULT_MODEL),
            system_prompt: env_or("SYSTEM_PROMPT", DEFAULT_SYSTEM_MESSAGE),
            image_model: env_or("IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            image_size: env_or("IMAGE_SIZE", "1024x1024"),
            transcription_model: env_or("TRANSCRIPTION_MODEL", DEFAULT_TRANSCRIPTION_MODEL),
            max_turns: env_parse("CONVERSATION_MAX_TURNS")?,
            session_scope: env_or("SESSION_SCOPE", "chat"),
            retry_max_attempts: env_parse("IMAGE_RETRY_MAX_ATTEMPTS")?
                .unwrap_or(defaults.max_attempts),
            retry_base_delay_ms: env_parse("IMAGE_RETRY_BASE_DELAY_MS")?
                .unwrap_or(defaults.base_delay.as_millis() as u64),
            retry_max_delay_ms: env_parse("IMAGE_RETRY_MAX_DELAY_MS")?
                .unwrap_or(defaults.max_delay.as_millis() as u64),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.base_url).is_err() {
            anyhow::bail!("AI_BASE_URL is not a valid URL: {}", self.base_url);
        }
        self.image_size()?;
        self.session_scope()?;
        if self.max_turns.is_some_and(|n| n < MIN_MAX_TURNS) {
            anyhow::bail!("CONVERSATION_MAX_TURNS must be at least {}", MIN_MAX_TURNS);
        }
        if self.retry_max_attempts == 0 {
            anyhow::bail!("IMAGE_RETRY_MAX_ATTEMPTS must be at least 1");
        }
        Ok(())
    }

    pub fn image_size(&self) -> Result<ImageSize> {
        parse_image_size(&self.image_size)
            .ok_or_else(|| anyhow::anyhow!("IMAGE_SIZE is not supported: {}", self.image_size))
    }

    pub fn session_scope(&self) -> Result<SessionScope> {
        self.session_scope
            .parse()
            .map_err(|e: String| anyhow::anyhow!("SESSION_SCOPE: {}", e))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
            Duration::from_millis(self.retry_max_delay_ms),
        )
    }
}
