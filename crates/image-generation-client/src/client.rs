//! Text-to-image client over async-openai. The endpoint is OpenAI-compatible, so the model is
//! passed through verbatim (e.g. `sdxl` on the Naga API, `dall-e-3` on OpenAI).

use async_openai::{
    config::OpenAIConfig,
    types::{CreateImageRequestArgs, Image, ImageModel, ImageSize},
    Client,
};
use async_trait::async_trait;
use openai_client::{mask_token, openai_config};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{ImageGenerationError, Result};

/// Model requested when none is configured.
pub const DEFAULT_IMAGE_MODEL: &str = "sdxl";

/// Something that turns a prompt into an image URL. Implemented by [`ImageGenerationClient`];
/// tests substitute scripted generators.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Requests one image for `prompt` and returns its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

/// Parses `WIDTHxHEIGHT` into one of the sizes the images API accepts.
pub fn parse_image_size(s: &str) -> Option<ImageSize> {
    match s.trim() {
        "256x256" => Some(ImageSize::S256x256),
        "512x512" => Some(ImageSize::S512x512),
        "1024x1024" => Some(ImageSize::S1024x1024),
        "1792x1024" => Some(ImageSize::S1792x1024),
        "1024x1792" => Some(ImageSize::S1024x1792),
        _ => None,
    }
}

fn image_model(model: &str) -> ImageModel {
    match model {
        "dall-e-2" => ImageModel::DallE2,
        "dall-e-3" => ImageModel::DallE3,
        other => ImageModel::Other(other.to_string()),
    }
}

/// Image generation client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct ImageGenerationClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    size: ImageSize,
    api_key_for_logging: Option<String>,
}

impl ImageGenerationClient {
    /// Creates a client against the default OpenAI base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(openai_config(api_key, None))),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: ImageSize::S1024x1024,
            api_key_for_logging,
        }
    }

    /// Creates a client against a custom base URL.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(openai_config(
                api_key,
                Some(base_url.as_str()),
            ))),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: ImageSize::S1024x1024,
            api_key_for_logging,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ImageGenerator for ImageGenerationClient {
    #[instrument(skip(self))]
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let masked = self
            .api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string());

        info!(
            model = %self.model,
            size = ?self.size,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %masked,
            "Image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(image_model(&self.model))
            .size(self.size)
            .n(1)
            .build()
            .map_err(|e| ImageGenerationError::Upstream(e.to_string()))?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "Image generation request JSON");
        }

        let response = self
            .client
            .images()
            .create(request)
            .await
            .map_err(|e| ImageGenerationError::Upstream(e.to_string()))?;

        match response.data.first().map(|d| d.as_ref()) {
            Some(Image::Url { url, .. }) => {
                info!(image_url = %url, "Image generation completed");
                Ok(url.clone())
            }
            Some(Image::B64Json { .. }) => Err(ImageGenerationError::Upstream(
                "Image returned inline instead of as a URL".to_string(),
            )),
            None => Err(ImageGenerationError::Upstream(
                "No image URL in response".to_string(),
            )),
        }
    }
}
