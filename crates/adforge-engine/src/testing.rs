//! In-memory fakes for orchestrator and pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use adforge_firestore::{FirestoreError, FirestoreResult};
use adforge_genai::{GenAiError, GenAiResult, GeneratedImageData, VideoOperationStatus};
use adforge_models::{
    BannerAd, CampaignDocument, CampaignId, EmailCopy, GeneratedImage, LandingPageConcept,
    VideoScript,
};

use crate::traits::{AssetStore, CampaignStore, ImageGeneration, TextGeneration, VideoGeneration};

pub fn sample_document() -> CampaignDocument {
    CampaignDocument {
        video_scripts: vec![VideoScript {
            platform: "tiktok".to_string(),
            script: "Open on the product...".to_string(),
        }],
        video_prompt: "a product hero shot, slow orbit".to_string(),
        email: EmailCopy {
            subject: "subject".to_string(),
            body: "body".to_string(),
        },
        banner_ads: vec![BannerAd {
            headline: "h".to_string(),
            description: "d".to_string(),
            cta: "c".to_string(),
            style: "s".to_string(),
            dimensions: "300x250".to_string(),
        }],
        landing_page: LandingPageConcept {
            hero_headline: "hero".to_string(),
            sub_headline: "sub".to_string(),
            cta_text: "cta".to_string(),
            sections: vec![],
        },
    }
}

/// Text generator returning a fixed document, or always failing.
pub struct FakeTextGen {
    fail: bool,
}

impl FakeTextGen {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl TextGeneration for FakeTextGen {
    async fn generate_campaign(
        &self,
        _brief: &str,
        _target_audience: &str,
    ) -> GenAiResult<CampaignDocument> {
        if self.fail {
            Err(GenAiError::text_failed("malformed JSON"))
        } else {
            Ok(sample_document())
        }
    }
}

/// Image generator counting calls; optionally fails prompts containing a
/// marker substring so tests can fail a specific index.
#[derive(Default)]
pub struct FakeImageGen {
    calls: AtomicUsize,
    fail_marker: Option<String>,
}

impl FakeImageGen {
    /// Fail the prompt carrying the given index marker (tests build
    /// prompts like "image prompt 1").
    pub fn failing_on(index: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_marker: Some(format!("prompt {}", index)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGeneration for FakeImageGen {
    async fn generate_image(&self, prompt: &str) -> GenAiResult<GeneratedImageData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = &self.fail_marker {
            if prompt.contains(marker) {
                return Err(GenAiError::image_failed("service returned 500"));
            }
        }
        Ok(GeneratedImageData {
            bytes: b"png-bytes".to_vec(),
            mime_type: "image/png".to_string(),
        })
    }
}

/// Image generator that always fails.
pub struct FailingImageGen;

#[async_trait]
impl ImageGeneration for FailingImageGen {
    async fn generate_image(&self, _prompt: &str) -> GenAiResult<GeneratedImageData> {
        Err(GenAiError::image_failed("service unavailable"))
    }
}

/// Scripted behavior for the fake video generator.
pub enum PollScript {
    /// Report done with a URI on the nth poll.
    DoneAfter(usize),
    /// Never report done.
    NeverDone,
    /// Fail the first n polls, then report done with a URI.
    FailPollsThenDone(usize),
    /// Submission itself fails.
    SubmitFails,
    /// Report done immediately, but with no URI.
    DoneWithoutUri,
}

pub struct FakeVideoGen {
    script: PollScript,
    polls: AtomicUsize,
}

impl FakeVideoGen {
    pub fn new(script: PollScript) -> Self {
        Self {
            script,
            polls: AtomicUsize::new(0),
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoGeneration for FakeVideoGen {
    async fn submit(&self, _prompt: &str) -> GenAiResult<String> {
        match self.script {
            PollScript::SubmitFails => Err(GenAiError::video_failed("no operation handle")),
            _ => Ok("models/test/operations/op-1".to_string()),
        }
    }

    async fn poll(&self, _operation: &str) -> GenAiResult<VideoOperationStatus> {
        let n = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.script {
            PollScript::DoneAfter(target) if n >= target => Ok(VideoOperationStatus {
                done: true,
                uri: Some("https://files.test/video-1".to_string()),
            }),
            PollScript::FailPollsThenDone(fails) => {
                if n <= fails {
                    Err(GenAiError::video_failed("transient poll error"))
                } else {
                    Ok(VideoOperationStatus {
                        done: true,
                        uri: Some("https://files.test/video-1".to_string()),
                    })
                }
            }
            PollScript::DoneWithoutUri => Ok(VideoOperationStatus {
                done: true,
                uri: None,
            }),
            _ => Ok(VideoOperationStatus {
                done: false,
                uri: None,
            }),
        }
    }

    async fn download(&self, _uri: &str) -> GenAiResult<Vec<u8>> {
        Ok(b"mp4-bytes".to_vec())
    }
}

/// Asset store recording uploads and minting deterministic URLs.
#[derive(Default)]
pub struct FakeAssetStore {
    uploads: AtomicUsize,
}

impl FakeAssetStore {
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for FakeAssetStore {
    async fn store(
        &self,
        _data: Vec<u8>,
        key: &str,
        _content_type: &str,
    ) -> adforge_storage::StorageResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://cdn.test/{}", key))
    }
}

/// Campaign store recording writes.
#[derive(Default)]
pub struct FakeCampaignStore {
    reject_writes: bool,
    generation_writes: AtomicUsize,
    video_urls: AtomicUsize,
    last_images: Mutex<Option<Vec<GeneratedImage>>>,
}

impl FakeCampaignStore {
    /// A store whose batched write always fails.
    pub fn rejecting() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub fn generation_writes(&self) -> usize {
        self.generation_writes.load(Ordering::SeqCst)
    }

    pub fn video_urls(&self) -> usize {
        self.video_urls.load(Ordering::SeqCst)
    }

    /// Image list from the most recent batched write (None when omitted).
    pub fn last_images(&self) -> Option<Vec<GeneratedImage>> {
        self.last_images.lock().unwrap().clone()
    }
}

#[async_trait]
impl CampaignStore for FakeCampaignStore {
    async fn write_generation_result(
        &self,
        _id: &CampaignId,
        _document: &CampaignDocument,
        images: Option<&[GeneratedImage]>,
    ) -> FirestoreResult<()> {
        if self.reject_writes {
            return Err(FirestoreError::request_failed("write rejected"));
        }
        self.generation_writes.fetch_add(1, Ordering::SeqCst);
        *self.last_images.lock().unwrap() = images.map(|i| i.to_vec());
        Ok(())
    }

    async fn set_video_url(&self, _id: &CampaignId, _url: &str) -> FirestoreResult<()> {
        self.video_urls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
