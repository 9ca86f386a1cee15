//! Per-prompt image generation outcomes.

use serde::{Deserialize, Serialize};

/// Outcome of one image-generation prompt.
///
/// Invariant: on completion exactly one of `url` / `error` is populated.
/// The constructors are the only intended way to build one, which keeps
/// the invariant out of caller hands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// The prompt this result answers
    pub prompt: String,
    /// Public URL of the stored asset, if generation succeeded
    pub url: Option<String>,
    /// True when the URL came from the fingerprint cache (no external call)
    pub cached: bool,
    /// Per-prompt failure message, if generation failed
    pub error: Option<String>,
}

impl GeneratedImage {
    /// A freshly generated and uploaded image.
    pub fn fresh(prompt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            url: Some(url.into()),
            cached: false,
            error: None,
        }
    }

    /// A cache hit: URL served from the fingerprint cache.
    pub fn from_cache(prompt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            url: Some(url.into()),
            cached: true,
            error: None,
        }
    }

    /// A per-prompt failure. Does not affect sibling prompts.
    pub fn failed(prompt: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            url: None,
            cached: false,
            error: Some(error.into()),
        }
    }

    /// Whether this result carries a usable asset URL.
    pub fn is_success(&self) -> bool {
        self.url.is_some()
    }
}
