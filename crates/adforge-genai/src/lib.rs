//! Gemini API clients for campaign asset generation.
//!
//! This crate provides:
//! - Structured campaign-document generation (JSON output, fence stripping)
//! - Image generation (inline binary payloads)
//! - Long-running video generation (submit, poll, download)

pub mod client;
pub mod error;
pub mod image;
pub mod text;
pub mod video;

pub use client::GeminiClient;
pub use error::{GenAiError, GenAiResult};
pub use image::GeneratedImageData;
pub use video::VideoOperationStatus;
