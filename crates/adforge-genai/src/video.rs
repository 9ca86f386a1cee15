//! Long-running video generation: submit, poll, download.

use serde::Deserialize;
use tracing::{debug, info};

use crate::client::{GeminiClient, VIDEO_MODEL};
use crate::error::{GenAiError, GenAiResult};

/// Status of a long-running video operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOperationStatus {
    pub done: bool,
    /// Retrievable video URI, present once generation finished
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    /// Operation resource name, e.g. `models/veo-.../operations/abc123`
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    #[serde(default)]
    done: bool,
    response: Option<OperationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResult {
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    uri: Option<String>,
}

impl GeminiClient {
    /// Submit a video generation request. Returns the operation handle.
    pub async fn submit_video(&self, prompt: &str) -> GenAiResult<String> {
        let body = serde_json::json!({
            "instances": [ { "prompt": prompt } ]
        });

        let url = self.model_url(VIDEO_MODEL, "predictLongRunning");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::video_failed(format!("submit failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenAiError::video_failed(format!(
                "submit returned {}: {}",
                status, error_text
            )));
        }

        let submit: SubmitResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::video_failed(format!("malformed submit response: {}", e)))?;

        let name = submit
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| GenAiError::video_failed("no operation handle in submit response"))?;

        info!(operation = %name, "Submitted video generation");
        Ok(name)
    }

    /// Poll a video operation once.
    pub async fn poll_video(&self, operation: &str) -> GenAiResult<VideoOperationStatus> {
        let url = format!("{}/{}?key={}", self.base_url, operation, self.api_key);
        debug!(operation = %operation, "Polling video operation");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GenAiError::video_failed(format!("poll failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenAiError::video_failed(format!(
                "poll returned {}: {}",
                status, error_text
            )));
        }

        let op: OperationResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::video_failed(format!("malformed poll response: {}", e)))?;

        let uri = op
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .and_then(|s| s.video)
            .and_then(|v| v.uri);

        Ok(VideoOperationStatus { done: op.done, uri })
    }

    /// Download the finished video binary.
    pub async fn download_video(&self, uri: &str) -> GenAiResult<Vec<u8>> {
        // The file URI requires the API key just like the REST endpoints
        let url = if uri.contains('?') {
            format!("{}&key={}", uri, self.api_key)
        } else {
            format!("{}?key={}", uri, self.api_key)
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GenAiError::video_failed(format!("download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GenAiError::video_failed(format!(
                "download returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenAiError::video_failed(format!("download body failed: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
