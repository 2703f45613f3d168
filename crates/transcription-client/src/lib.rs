//! # Transcription client
//!
//! Speech-to-text for voice messages: uploads an audio file to a Whisper-compatible
//! `/audio/transcriptions` endpoint and returns the recognized text.

use anyhow::{Context, Result};
use async_openai::{config::OpenAIConfig, types::CreateTranscriptionRequestArgs, Client};
use async_trait::async_trait;
use openai_client::{mask_token, openai_config};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Transcription model used when none is configured.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Turns a local audio file into text. Implemented by [`TranscriptionClient`]; tests substitute
/// fixed transcripts.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Hosted speech-to-text client over async-openai.
#[derive(Clone)]
pub struct TranscriptionClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    api_key_for_logging: Option<String>,
}

impl TranscriptionClient {
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(openai_config(api_key, None))),
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            api_key_for_logging,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(openai_config(
                api_key,
                Some(base_url.as_str()),
            ))),
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            api_key_for_logging,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl SpeechToText for TranscriptionClient {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let masked = self
            .api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string());
        info!(model = %self.model, api_key = %masked, "Transcription request");

        let request = CreateTranscriptionRequestArgs::default()
            .file(audio_path)
            .model(self.model.as_str())
            .build()?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .context("Transcription request failed")?;

        let text = response.text.trim().to_string();
        info!(
            chars = text.chars().count(),
            preview = %text.chars().take(80).collect::<String>(),
            "Transcription completed"
        );
        Ok(text)
    }
}
