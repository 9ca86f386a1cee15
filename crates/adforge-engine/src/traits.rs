//! Service seams between the orchestrator and its collaborators.
//!
//! The concrete clients (Gemini, R2, Firestore) implement these traits;
//! orchestrator tests inject in-memory fakes.

use async_trait::async_trait;

use adforge_firestore::{CampaignRepository, FirestoreResult};
use adforge_genai::{GenAiResult, GeminiClient, GeneratedImageData, VideoOperationStatus};
use adforge_models::{CampaignDocument, CampaignId, GeneratedImage};
use adforge_storage::{R2Client, StorageResult};

/// Text-generation service: one call, one structured document.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate_campaign(
        &self,
        brief: &str,
        target_audience: &str,
    ) -> GenAiResult<CampaignDocument>;
}

/// Image-generation service: prompt in, inline binary out.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> GenAiResult<GeneratedImageData>;
}

/// Long-running video-generation service.
#[async_trait]
pub trait VideoGeneration: Send + Sync {
    async fn submit(&self, prompt: &str) -> GenAiResult<String>;
    async fn poll(&self, operation: &str) -> GenAiResult<VideoOperationStatus>;
    async fn download(&self, uri: &str) -> GenAiResult<Vec<u8>>;
}

/// Durable object storage: bytes in, public URL out.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, data: Vec<u8>, key: &str, content_type: &str) -> StorageResult<String>;
}

/// The campaign record store, with partial-update semantics.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn write_generation_result(
        &self,
        id: &CampaignId,
        document: &CampaignDocument,
        images: Option<&[GeneratedImage]>,
    ) -> FirestoreResult<()>;

    async fn set_video_url(&self, id: &CampaignId, url: &str) -> FirestoreResult<()>;
}

#[async_trait]
impl TextGeneration for GeminiClient {
    async fn generate_campaign(
        &self,
        brief: &str,
        target_audience: &str,
    ) -> GenAiResult<CampaignDocument> {
        GeminiClient::generate_campaign(self, brief, target_audience).await
    }
}

#[async_trait]
impl ImageGeneration for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> GenAiResult<GeneratedImageData> {
        GeminiClient::generate_image(self, prompt).await
    }
}

#[async_trait]
impl VideoGeneration for GeminiClient {
    async fn submit(&self, prompt: &str) -> GenAiResult<String> {
        self.submit_video(prompt).await
    }

    async fn poll(&self, operation: &str) -> GenAiResult<VideoOperationStatus> {
        self.poll_video(operation).await
    }

    async fn download(&self, uri: &str) -> GenAiResult<Vec<u8>> {
        self.download_video(uri).await
    }
}

#[async_trait]
impl AssetStore for R2Client {
    async fn store(&self, data: Vec<u8>, key: &str, content_type: &str) -> StorageResult<String> {
        self.upload_public(data, key, content_type).await
    }
}

#[async_trait]
impl CampaignStore for CampaignRepository {
    async fn write_generation_result(
        &self,
        id: &CampaignId,
        document: &CampaignDocument,
        images: Option<&[GeneratedImage]>,
    ) -> FirestoreResult<()> {
        CampaignRepository::write_generation_result(self, id, document, images).await
    }

    async fn set_video_url(&self, id: &CampaignId, url: &str) -> FirestoreResult<()> {
        CampaignRepository::set_video_url(self, id, url).await
    }
}
