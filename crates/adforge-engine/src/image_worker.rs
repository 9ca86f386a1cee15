//! Per-prompt image generation worker.

use std::sync::Arc;

use tracing::{debug, warn};

use adforge_models::{CampaignId, GeneratedImage};
use adforge_storage::image_key;

use crate::prompt_cache::{fingerprint, PromptCache};
use crate::traits::{AssetStore, ImageGeneration};

/// Runs one generation call per prompt, independently of its siblings.
///
/// Every outcome is data: success, cache hit, or a per-prompt error. A
/// failing prompt never aborts the others and never fails the campaign.
#[derive(Clone)]
pub struct ImageWorker {
    generator: Arc<dyn ImageGeneration>,
    assets: Arc<dyn AssetStore>,
    cache: Arc<PromptCache>,
}

impl ImageWorker {
    pub fn new(
        generator: Arc<dyn ImageGeneration>,
        assets: Arc<dyn AssetStore>,
        cache: Arc<PromptCache>,
    ) -> Self {
        Self {
            generator,
            assets,
            cache,
        }
    }

    /// Generate (or reuse) the image for one prompt.
    pub async fn generate(
        &self,
        prompt: &str,
        campaign_id: &CampaignId,
        index: usize,
    ) -> GeneratedImage {
        let fp = fingerprint(prompt);

        if let Some(url) = self.cache.get(&fp) {
            debug!(campaign_id = %campaign_id, index, "Image served from fingerprint cache");
            return GeneratedImage::from_cache(prompt, url);
        }

        let data = match self.generator.generate_image(prompt).await {
            Ok(data) => data,
            Err(e) => {
                warn!(campaign_id = %campaign_id, index, "Image generation failed: {}", e);
                return GeneratedImage::failed(prompt, e.to_string());
            }
        };

        let key = image_key(campaign_id, index);
        let url = match self.assets.store(data.bytes, &key, &data.mime_type).await {
            Ok(url) => url,
            Err(e) => {
                warn!(campaign_id = %campaign_id, index, "Image upload failed: {}", e);
                return GeneratedImage::failed(prompt, format!("upload failed: {}", e));
            }
        };

        self.cache.put(fp, url.clone());
        GeneratedImage::fresh(prompt, url)
    }
}
