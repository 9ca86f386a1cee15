//! The structured campaign document produced by text generation.
//!
//! The document shape is a contract with both the text-generation prompt
//! (which instructs the model to emit exactly these keys) and the UI layer
//! (which reads the persisted `result` field). Parsing alone is not enough:
//! a syntactically valid document with missing or empty required fields is
//! rejected by [`CampaignDocument::validate`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failure for a parsed campaign document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is missing required content: {0}")]
    MissingContent(&'static str),
}

/// A platform-specific short video script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoScript {
    /// Target platform (e.g. "tiktok", "instagram_reels", "youtube_shorts")
    pub platform: String,
    /// Full script text
    pub script: String,
}

/// Marketing email copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailCopy {
    pub subject: String,
    pub body: String,
}

/// One banner ad variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerAd {
    pub headline: String,
    pub description: String,
    pub cta: String,
    /// Visual style direction (e.g. "bold minimal", "lifestyle photo")
    pub style: String,
    /// Banner dimensions (e.g. "728x90", "300x250")
    pub dimensions: String,
}

/// A structured section of the landing-page concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingSection {
    pub title: String,
    pub body: String,
}

/// Landing-page concept: hero copy plus extended sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPageConcept {
    pub hero_headline: String,
    pub sub_headline: String,
    pub cta_text: String,
    #[serde(default)]
    pub sections: Vec<LandingSection>,
}

/// The complete generated campaign document.
///
/// Missing top-level keys fail deserialization; [`validate`] then rejects
/// documents whose required content is present but empty. Both failures are
/// fatal for the whole generation request, because the `video_prompt` field
/// is required to trigger the background video pipeline.
///
/// [`validate`]: CampaignDocument::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDocument {
    pub video_scripts: Vec<VideoScript>,
    /// Single prompt handed to the video-generation pipeline
    pub video_prompt: String,
    pub email: EmailCopy,
    pub banner_ads: Vec<BannerAd>,
    pub landing_page: LandingPageConcept,
}

impl CampaignDocument {
    /// Explicit post-parse schema validation.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.video_prompt.trim().is_empty() {
            return Err(DocumentError::MissingContent("video_prompt"));
        }
        if self.video_scripts.is_empty() {
            return Err(DocumentError::MissingContent("video_scripts"));
        }
        if self.email.subject.trim().is_empty() || self.email.body.trim().is_empty() {
            return Err(DocumentError::MissingContent("email"));
        }
        if self.banner_ads.is_empty() {
            return Err(DocumentError::MissingContent("banner_ads"));
        }
        if self.landing_page.hero_headline.trim().is_empty() {
            return Err(DocumentError::MissingContent("landing_page.hero_headline"));
        }
        Ok(())
    }

    /// Whether this document requests video generation.
    pub fn has_video_prompt(&self) -> bool {
        !self.video_prompt.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_document() -> CampaignDocument {
        CampaignDocument {
            video_scripts: vec![VideoScript {
                platform: "tiktok".to_string(),
                script: "Open on the bottle in morning light...".to_string(),
            }],
            video_prompt: "A sleek eco-friendly water bottle on a mossy rock".to_string(),
            email: EmailCopy {
                subject: "Meet your last water bottle".to_string(),
                body: "Hi there,\n\nPlastic is over.".to_string(),
            },
            banner_ads: vec![BannerAd {
                headline: "Drink different".to_string(),
                description: "Zero plastic, infinite refills".to_string(),
                cta: "Shop now".to_string(),
                style: "bold minimal".to_string(),
                dimensions: "728x90".to_string(),
            }],
            landing_page: LandingPageConcept {
                hero_headline: "The last bottle you'll buy".to_string(),
                sub_headline: "Built from ocean-bound plastic".to_string(),
                cta_text: "Get yours".to_string(),
                sections: vec![LandingSection {
                    title: "Why it matters".to_string(),
                    body: "Every refill keeps a bottle out of the ocean.".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(sample_document().validate().is_ok());
    }

    #[test]
    fn test_empty_video_prompt_rejected() {
        let mut doc = sample_document();
        doc.video_prompt = "   ".to_string();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_empty_scripts_rejected() {
        let mut doc = sample_document();
        doc.video_scripts.clear();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_missing_top_level_key_fails_deserialization() {
        // No `email` key at all
        let json = r#"{
            "video_scripts": [{"platform": "tiktok", "script": "s"}],
            "video_prompt": "p",
            "banner_ads": [],
            "landing_page": {"hero_headline": "h", "sub_headline": "s", "cta_text": "c"}
        }"#;
        assert!(serde_json::from_str::<CampaignDocument>(json).is_err());
    }

    #[test]
    fn test_landing_sections_default_to_empty() {
        let json = r#"{
            "video_scripts": [{"platform": "tiktok", "script": "s"}],
            "video_prompt": "p",
            "email": {"subject": "a", "body": "b"},
            "banner_ads": [{"headline": "h", "description": "d", "cta": "c", "style": "s", "dimensions": "300x250"}],
            "landing_page": {"hero_headline": "h", "sub_headline": "s", "cta_text": "c"}
        }"#;
        let doc: CampaignDocument = serde_json::from_str(json).unwrap();
        assert!(doc.landing_page.sections.is_empty());
        assert!(doc.validate().is_ok());
    }
}
