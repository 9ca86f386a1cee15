//! Campaign asset-generation orchestrator.
//!
//! This crate provides:
//! - The prompt fingerprint cache (bounded, insertion-order eviction)
//! - Per-prompt image generation workers
//! - The campaign orchestrator (concurrent fan-out, one batched write)
//! - The background video pipeline (poll with backoff, patch on completion)
//! - The HTTP entry point consumed by the UI layer

pub mod api;
pub mod config;
pub mod error;
pub mod image_worker;
pub mod orchestrator;
pub mod prompt_cache;
pub mod service;
pub mod tasks;
pub mod traits;
pub mod video_pipeline;

#[cfg(test)]
mod testing;

pub use config::{EngineConfig, PollConfig};
pub use error::{EngineError, EngineResult};
pub use image_worker::ImageWorker;
pub use orchestrator::Orchestrator;
pub use prompt_cache::{fingerprint, PromptCache};
pub use service::CampaignService;
pub use tasks::TaskTracker;
pub use video_pipeline::{VideoOutcome, VideoPipeline};
