//! Background video pipeline.
//!
//! Runs after the orchestrator has already answered its caller: submit the
//! long-running generation request, poll with capped exponential backoff,
//! then download/store the asset and patch the campaign record. Every
//! failure past the hand-off is terminal and logged only; there is no
//! caller left to surface it to.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use adforge_models::CampaignId;
use adforge_storage::video_key;

use crate::config::PollConfig;
use crate::traits::{AssetStore, CampaignStore, VideoGeneration};

/// Terminal state of one campaign's video request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOutcome {
    /// Asset stored and the campaign record patched with its URL.
    Completed(String),
    /// Attempt cap reached without the operation reporting done.
    Exhausted,
    /// Submission failed, the operation finished without a usable URI,
    /// or a post-completion step failed.
    Failed(String),
}

/// Next backoff delay: multiply and cap. Jitter is added separately so the
/// schedule itself stays deterministic.
pub fn next_delay(config: &PollConfig, current_ms: u64) -> u64 {
    ((current_ms as f64 * config.multiplier) as u64).min(config.max_delay_ms)
}

/// Random jitter up to `config.jitter_ms`. Time-based pseudo-randomization
/// avoids pulling in a rand dependency.
fn jitter(config: &PollConfig) -> u64 {
    if config.jitter_ms == 0 {
        return 0;
    }
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    nanos % config.jitter_ms
}

pub struct VideoPipeline {
    video: Arc<dyn VideoGeneration>,
    assets: Arc<dyn AssetStore>,
    store: Arc<dyn CampaignStore>,
    config: PollConfig,
}

impl VideoPipeline {
    pub fn new(
        video: Arc<dyn VideoGeneration>,
        assets: Arc<dyn AssetStore>,
        store: Arc<dyn CampaignStore>,
        config: PollConfig,
    ) -> Self {
        Self {
            video,
            assets,
            store,
            config,
        }
    }

    /// Drive one campaign's video request to a terminal state.
    pub async fn run(&self, campaign_id: &CampaignId, prompt: &str) -> VideoOutcome {
        let operation = match self.video.submit(prompt).await {
            Ok(op) => op,
            Err(e) => {
                warn!(campaign_id = %campaign_id, "Video submission failed: {}", e);
                return VideoOutcome::Failed(format!("submit: {}", e));
            }
        };

        let mut delay_ms = self.config.initial_delay_ms;

        for attempt in 1..=self.config.max_attempts {
            tokio::time::sleep(Duration::from_millis(delay_ms + jitter(&self.config))).await;

            match self.video.poll(&operation).await {
                Ok(status) if status.done => {
                    return match status.uri {
                        Some(uri) => self.complete(campaign_id, &uri).await,
                        None => {
                            warn!(campaign_id = %campaign_id, "Video operation done without URI");
                            VideoOutcome::Failed("done without video URI".to_string())
                        }
                    };
                }
                Ok(_) => {
                    info!(
                        campaign_id = %campaign_id,
                        attempt,
                        delay_ms,
                        "Video not ready yet"
                    );
                }
                // Transient poll failures consume an attempt and continue
                Err(e) => {
                    warn!(campaign_id = %campaign_id, attempt, "Video poll failed: {}", e);
                }
            }

            delay_ms = next_delay(&self.config, delay_ms);
        }

        warn!(
            campaign_id = %campaign_id,
            attempts = self.config.max_attempts,
            "Video polling exhausted"
        );
        VideoOutcome::Exhausted
    }

    async fn complete(&self, campaign_id: &CampaignId, uri: &str) -> VideoOutcome {
        let bytes = match self.video.download(uri).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(campaign_id = %campaign_id, "Video download failed: {}", e);
                return VideoOutcome::Failed(format!("download: {}", e));
            }
        };

        let key = video_key(campaign_id);
        let url = match self.assets.store(bytes, &key, "video/mp4").await {
            Ok(url) => url,
            Err(e) => {
                warn!(campaign_id = %campaign_id, "Video upload failed: {}", e);
                return VideoOutcome::Failed(format!("upload: {}", e));
            }
        };

        if let Err(e) = self.store.set_video_url(campaign_id, &url).await {
            warn!(campaign_id = %campaign_id, "Video URL patch failed: {}", e);
            return VideoOutcome::Failed(format!("patch: {}", e));
        }

        info!(campaign_id = %campaign_id, url = %url, "Video generation completed");
        VideoOutcome::Completed(url)
    }
}
