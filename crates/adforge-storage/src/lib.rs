//! Cloudflare R2 storage client for generated campaign assets.
//!
//! This crate provides:
//! - Byte uploads to R2
//! - Public asset URLs (the bucket fronts a public CDN base)
//! - Unique, append-only asset key naming per campaign

pub mod client;
pub mod error;
pub mod keys;

pub use client::{R2Client, R2Config};
pub use error::{StorageError, StorageResult};
pub use keys::{image_key, video_key};
