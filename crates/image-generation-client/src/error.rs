use thiserror::Error;

/// Errors from image generation and image download.
#[derive(Error, Debug)]
pub enum ImageGenerationError {
    /// The text-to-image endpoint failed or returned no image URL.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Fetching the generated image failed: non-200 status, transport error, or undecodable body.
    #[error("Download error: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageGenerationError {
    pub fn is_download(&self) -> bool {
        matches!(self, ImageGenerationError::Download(_))
    }
}

pub type Result<T> = std::result::Result<T, ImageGenerationError>;
