//! Fetches a generated image and re-encodes it as JPEG on disk.

use reqwest::StatusCode;
use std::path::Path;
use tracing::{info, instrument};

use crate::error::{ImageGenerationError, Result};

/// Downloads the image at `url`, decodes it, and writes it to `path` as JPEG.
///
/// Any status other than 200 and any body that does not decode as an image is a
/// [`ImageGenerationError::Download`]. Parent directories of `path` are created as needed.
#[instrument(skip(http), fields(path = %path.display()))]
pub async fn download_image(http: &reqwest::Client, url: &str, path: &Path) -> Result<()> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| ImageGenerationError::Download(e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ImageGenerationError::Download(format!(
            "Failed to download image. Status code: {}",
            status.as_u16()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ImageGenerationError::Download(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let target = path.to_path_buf();
    let size = bytes.len();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let decoded = image::load_from_memory(&bytes).map_err(|e| {
            ImageGenerationError::Download(format!("Failed to decode image: {}", e))
        })?;
        image::DynamicImage::ImageRgb8(decoded.to_rgb8())
            .save_with_format(&target, image::ImageFormat::Jpeg)
            .map_err(|e| ImageGenerationError::Download(format!("Failed to save image: {}", e)))
    })
    .await
    .map_err(|e| ImageGenerationError::Download(format!("Image decode task failed: {}", e)))??;

    info!(bytes = size, "Image downloaded");
    Ok(())
}
