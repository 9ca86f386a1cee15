//! Image generation via inline binary payloads.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use crate::client::{GeminiClient, IMAGE_MODEL};
use crate::error::{GenAiError, GenAiResult};

/// Decoded image bytes plus the reported mime type.
#[derive(Debug, Clone)]
pub struct GeneratedImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

impl GeminiClient {
    /// Generate one image for the prompt.
    ///
    /// A non-2xx response or a payload with no inline image data is an
    /// error for this prompt only; the caller records it per item.
    pub async fn generate_image(&self, prompt: &str) -> GenAiResult<GeneratedImageData> {
        debug!("Requesting image from {}", IMAGE_MODEL);

        let body = serde_json::json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "responseModalities": ["IMAGE", "TEXT"]
            }
        });

        let url = self.model_url(IMAGE_MODEL, "generateContent");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::image_failed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenAiError::image_failed(format!(
                "service returned {}: {}",
                status, error_text
            )));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::image_failed(format!("malformed response: {}", e)))?;

        let inline = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.inline_data)
            .ok_or_else(|| GenAiError::image_failed("no inline image data in response"))?;

        let bytes = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| GenAiError::image_failed(format!("invalid base64 payload: {}", e)))?;

        Ok(GeneratedImageData {
            bytes,
            mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
        })
    }
}
