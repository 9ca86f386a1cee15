//! Campaign record repository.
//!
//! The campaign record is created by the surrounding application before
//! generation starts. This repository only patches it: once with the
//! batched generation result, and later (optionally) with the video URL.

use std::collections::HashMap;

use tracing::info;

use adforge_models::{
    CampaignDocument, CampaignId, GeneratedImage, FIELD_GENERATED_IMAGES,
    FIELD_GENERATED_VIDEO_URL, FIELD_RESULT,
};

use crate::client::FirestoreClient;
use crate::error::FirestoreResult;
use crate::retry::with_retry;
use crate::types::{to_value, Document, Value};

const COLLECTION: &str = "campaigns";

/// Repository for campaign documents.
#[derive(Clone)]
pub struct CampaignRepository {
    client: FirestoreClient,
}

impl CampaignRepository {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    /// Fetch the raw campaign record.
    pub async fn get(&self, id: &CampaignId) -> FirestoreResult<Option<Document>> {
        self.client.get_document(COLLECTION, id.as_str()).await
    }

    /// The one batched write of a generation run: the structured document,
    /// plus the image results only when images were requested. The update
    /// mask keeps every other field of the record untouched.
    pub async fn write_generation_result(
        &self,
        id: &CampaignId,
        document: &CampaignDocument,
        images: Option<&[GeneratedImage]>,
    ) -> FirestoreResult<()> {
        let mut fields: HashMap<String, Value> = HashMap::new();
        let mut mask = vec![FIELD_RESULT.to_string()];

        fields.insert(FIELD_RESULT.to_string(), to_value(document)?);

        if let Some(images) = images {
            fields.insert(FIELD_GENERATED_IMAGES.to_string(), to_value(&images)?);
            mask.push(FIELD_GENERATED_IMAGES.to_string());
        }

        let retry = self.client.retry_config().clone();
        with_retry(&retry, "write_generation_result", || {
            self.client.update_document(
                COLLECTION,
                id.as_str(),
                fields.clone(),
                Some(mask.clone()),
            )
        })
        .await?;

        info!(
            campaign_id = %id,
            images = images.map(|i| i.len()).unwrap_or(0),
            "Wrote generation result"
        );
        Ok(())
    }

    /// The later, independent patch of the video URL once the background
    /// pipeline completes.
    pub async fn set_video_url(&self, id: &CampaignId, url: &str) -> FirestoreResult<()> {
        let mut fields = HashMap::new();
        fields.insert(
            FIELD_GENERATED_VIDEO_URL.to_string(),
            Value::StringValue(url.to_string()),
        );

        let retry = self.client.retry_config().clone();
        with_retry(&retry, "set_video_url", || {
            self.client.update_document(
                COLLECTION,
                id.as_str(),
                fields.clone(),
                Some(vec![FIELD_GENERATED_VIDEO_URL.to_string()]),
            )
        })
        .await?;

        info!(campaign_id = %id, "Patched campaign with video URL");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adforge_models::{BannerAd, EmailCopy, LandingPageConcept, VideoScript};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_document() -> CampaignDocument {
        CampaignDocument {
            video_scripts: vec![VideoScript {
                platform: "tiktok".to_string(),
                script: "script".to_string(),
            }],
            video_prompt: "a bottle spinning".to_string(),
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

    fn ok_doc() -> serde_json::Value {
        serde_json::json!({ "name": "campaigns/c1", "fields": {} })
    }

    #[tokio::test]
    async fn test_batched_write_masks_result_and_images() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/campaigns/c1"))
            .and(query_param("updateMask.fieldPaths", "result"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_doc()))
            .expect(1)
            .mount(&server)
            .await;

        let repo = CampaignRepository::new(FirestoreClient::with_base_url(server.uri()).unwrap());
        let images = vec![GeneratedImage::fresh("p", "https://cdn/p.png")];
        repo.write_generation_result(&CampaignId::from_string("c1"), &sample_document(), Some(&images))
            .await
            .unwrap();
        // Both field paths travel in the same request
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let query = requests[0].url.query().unwrap_or("");
        assert!(query.contains("updateMask.fieldPaths=result"));
        assert!(query.contains("updateMask.fieldPaths=generated_images"));
    }

    #[tokio::test]
    async fn test_write_without_images_omits_image_field() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/campaigns/c2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_doc()))
            .expect(1)
            .mount(&server)
            .await;

        let repo = CampaignRepository::new(FirestoreClient::with_base_url(server.uri()).unwrap());
        repo.write_generation_result(&CampaignId::from_string("c2"), &sample_document(), None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap_or("");
        assert!(query.contains("updateMask.fieldPaths=result"));
        assert!(!query.contains("generated_images"));
    }

    #[tokio::test]
    async fn test_set_video_url_patches_single_field() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/campaigns/c3"))
            .and(query_param("updateMask.fieldPaths", "generated_video_url"))
            .and(body_partial_json(serde_json::json!({
                "fields": {
                    "generated_video_url": { "stringValue": "https://cdn/v.mp4" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_doc()))
            .expect(1)
            .mount(&server)
            .await;

        let repo = CampaignRepository::new(FirestoreClient::with_base_url(server.uri()).unwrap());
        repo.set_video_url(&CampaignId::from_string("c3"), "https://cdn/v.mp4")
            .await
            .unwrap();
    }
}
