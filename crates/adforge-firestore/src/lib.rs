//! Firestore REST record store for campaign records.
//!
//! This crate provides:
//! - Token caching with refresh margin and single-flight refresh
//! - HTTP client tuning (pooling, timeouts)
//! - Exponential backoff with jitter on retryable failures
//! - Partial document updates via update masks
//! - The campaign repository (batched generation write + video URL patch)

pub mod campaign_repo;
pub mod client;
pub mod error;
pub mod retry;
pub mod token_cache;
pub mod types;

pub use campaign_repo::CampaignRepository;
pub use client::{FirestoreClient, FirestoreConfig};
pub use error::{FirestoreError, FirestoreResult};
pub use retry::{with_retry, RetryConfig};
pub use types::{ArrayValue, Document, MapValue, Value};
