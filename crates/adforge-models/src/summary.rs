//! Orchestration result summary returned to the caller.

use serde::{Deserialize, Serialize};

use crate::image::GeneratedImage;

/// Summary returned by the campaign orchestrator once the batched write
/// has succeeded. Video generation, if initiated, continues after this
/// value is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub success: bool,
    /// Count of images generated fresh (external call made)
    pub generated_images: usize,
    /// Count of images served from the fingerprint cache
    pub cached_images: usize,
    /// Count of prompts requested
    pub total_requested: usize,
    /// True when a video prompt was present and the pipeline was started
    pub video_generating: bool,
    pub message: String,
}

impl GenerationSummary {
    /// Build a summary from the reconciled image results.
    pub fn from_results(results: &[GeneratedImage], video_generating: bool) -> Self {
        let cached = results.iter().filter(|r| r.cached).count();
        let fresh = results.iter().filter(|r| r.is_success() && !r.cached).count();
        let failed = results.len() - cached - fresh;

        let message = if failed == 0 {
            "Campaign assets generated".to_string()
        } else {
            format!("Campaign assets generated ({} image(s) failed)", failed)
        };

        Self {
            success: true,
            generated_images: fresh,
            cached_images: cached,
            total_requested: results.len(),
            video_generating,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_split_fresh_cached_failed() {
        let results = vec![
            GeneratedImage::fresh("a", "https://cdn/a.png"),
            GeneratedImage::from_cache("b", "https://cdn/b.png"),
            GeneratedImage::failed("c", "boom"),
        ];
        let summary = GenerationSummary::from_results(&results, true);
        assert_eq!(summary.generated_images, 1);
        assert_eq!(summary.cached_images, 1);
        assert_eq!(summary.total_requested, 3);
        assert!(summary.video_generating);
        assert!(summary.success);
        assert!(summary.message.contains("1 image(s) failed"));
    }

    #[test]
    fn test_empty_results_still_succeed() {
        let summary = GenerationSummary::from_results(&[], false);
        assert_eq!(summary.total_requested, 0);
        assert!(summary.success);
    }
}
