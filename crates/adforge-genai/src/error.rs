//! Generation error types.

use thiserror::Error;

/// Result type for generation operations.
pub type GenAiResult<T> = Result<T, GenAiError>;

/// Errors that can occur calling the generation services.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Text generation failed: {0}")]
    TextFailed(String),

    #[error("Image generation failed: {0}")]
    ImageFailed(String),

    #[error("Video generation failed: {0}")]
    VideoFailed(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] adforge_models::DocumentError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenAiError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn text_failed(msg: impl Into<String>) -> Self {
        Self::TextFailed(msg.into())
    }

    pub fn image_failed(msg: impl Into<String>) -> Self {
        Self::ImageFailed(msg.into())
    }

    pub fn video_failed(msg: impl Into<String>) -> Self {
        Self::VideoFailed(msg.into())
    }
}
