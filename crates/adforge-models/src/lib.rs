//! Shared data models for the AdForge backend.
//!
//! This crate provides Serde-serializable types for:
//! - Campaign identity and the generated campaign document
//! - Per-prompt image generation outcomes
//! - The orchestrator's result summary

pub mod campaign;
pub mod document;
pub mod image;
pub mod summary;

// Re-export common types
pub use campaign::CampaignId;
pub use document::{
    BannerAd, CampaignDocument, DocumentError, EmailCopy, LandingPageConcept, LandingSection,
    VideoScript,
};
pub use image::GeneratedImage;
pub use summary::GenerationSummary;

/// Persisted field name for the structured campaign document.
///
/// These names are a wire contract with the UI layer, which polls the
/// record store directly. Do not rename.
pub const FIELD_RESULT: &str = "result";
/// Persisted field name for the image results list.
pub const FIELD_GENERATED_IMAGES: &str = "generated_images";
/// Persisted field name for the video URL patch.
pub const FIELD_GENERATED_VIDEO_URL: &str = "generated_video_url";
