//! # Image generation client
//!
//! Text-to-image against an OpenAI-compatible `/images/generations` endpoint, download of the
//! generated image into a local JPEG file, and a bounded exponential-backoff [`RetryPolicy`]
//! wrapping both steps.

mod client;
mod download;
mod error;
mod retry;

pub use async_openai::types::ImageSize;
pub use client::{parse_image_size, ImageGenerationClient, ImageGenerator, DEFAULT_IMAGE_MODEL};
pub use download::download_image;
pub use error::{ImageGenerationError, Result};
pub use retry::RetryPolicy;

use std::path::Path;
use tracing::{debug, info, instrument};

/// Generates an image for `prompt` and stores it at `path`, retrying the whole
/// generate-then-download sequence under `policy`.
///
/// Returns the last error once `policy.max_attempts` attempts have failed.
#[instrument(skip(generator, http, policy), fields(path = %path.display()))]
pub async fn generate_to_file(
    generator: &dyn ImageGenerator,
    http: &reqwest::Client,
    prompt: &str,
    path: &Path,
    policy: &RetryPolicy,
) -> Result<()> {
    policy
        .run(|attempt| async move {
            debug!(attempt, "step: image generation attempt");
            let url = generator.generate_image(prompt).await?;
            download_image(http, &url, path).await
        })
        .await?;
    info!(path = %path.display(), "Image stored");
    Ok(())
}
