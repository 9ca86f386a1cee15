//! Asset key naming.
//!
//! Keys are unique per campaign/timestamp/index so concurrent campaigns
//! and re-runs of the same campaign never overwrite each other. Object
//! storage writes are therefore append-only.

use adforge_models::CampaignId;
use chrono::Utc;

/// Key for a generated campaign image.
pub fn image_key(campaign_id: &CampaignId, index: usize) -> String {
    format!(
        "campaigns/{}/images/{}-{}.png",
        campaign_id.as_str(),
        Utc::now().timestamp_millis(),
        index
    )
}

/// Key for a generated campaign video.
pub fn video_key(campaign_id: &CampaignId) -> String {
    format!(
        "campaigns/{}/video/{}.mp4",
        campaign_id.as_str(),
        Utc::now().timestamp_millis()
    )
}
