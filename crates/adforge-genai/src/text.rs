//! Structured campaign-document generation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use adforge_models::CampaignDocument;

use crate::client::{GeminiClient, TEXT_MODEL};
use crate::error::{GenAiError, GenAiResult};

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Generate the structured campaign document.
    ///
    /// A parse or validation failure here is fatal for the whole campaign
    /// generation request: without the document there is no `video_prompt`
    /// and nothing meaningful to persist.
    pub async fn generate_campaign(
        &self,
        brief: &str,
        target_audience: &str,
    ) -> GenAiResult<CampaignDocument> {
        let prompt = build_campaign_prompt(brief, target_audience);
        debug!("Requesting campaign document from {}", TEXT_MODEL);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = self.model_url(TEXT_MODEL, "generateContent");
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenAiError::text_failed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenAiError::text_failed(format!(
                "service returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::text_failed(format!("malformed response: {}", e)))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| GenAiError::text_failed("no content in response"))?;

        let document: CampaignDocument = serde_json::from_str(strip_code_fences(text))
            .map_err(|e| GenAiError::text_failed(format!("failed to parse document JSON: {}", e)))?;
        document.validate()?;

        info!(
            scripts = document.video_scripts.len(),
            banners = document.banner_ads.len(),
            "Generated campaign document"
        );
        Ok(document)
    }
}

/// Strip leading/trailing markdown code-fence markers the model sometimes
/// wraps JSON output in, even when asked for raw JSON.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = if let Some(rest) = text.strip_prefix("```json") {
        rest
    } else if let Some(rest) = text.strip_prefix("```") {
        rest
    } else {
        text
    };
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

fn build_campaign_prompt(brief: &str, target_audience: &str) -> String {
    format!(
        r#"You are a senior marketing copywriter. Create a complete campaign for this product.

PRODUCT BRIEF:
{brief}

TARGET AUDIENCE:
{target_audience}

IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object with this schema:
{{
  "video_scripts": [
    {{ "platform": "tiktok|instagram_reels|youtube_shorts", "script": "Full spoken script" }}
  ],
  "video_prompt": "One vivid visual prompt for a short product video",
  "email": {{ "subject": "Email subject line", "body": "Full email body" }},
  "banner_ads": [
    {{
      "headline": "Short headline",
      "description": "Supporting line",
      "cta": "Call to action",
      "style": "Visual style direction",
      "dimensions": "WxH"
    }}
  ],
  "landing_page": {{
    "hero_headline": "Hero headline",
    "sub_headline": "Supporting subheadline",
    "cta_text": "Primary CTA",
    "sections": [ {{ "title": "Section title", "body": "Section body" }} ]
  }}
}}

Additional instructions:
- Return ONLY a single JSON object and nothing else.
- Provide one video script per platform: tiktok, instagram_reels, youtube_shorts.
- Provide exactly 3 banner_ads variants with distinct styles and dimensions.
- video_prompt must be a single non-empty string.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC_JSON: &str = r#"{
        "video_scripts": [{"platform": "tiktok", "script": "s"}],
        "video_prompt": "a bottle on a rock",
        "email": {"subject": "a", "body": "b"},
        "banner_ads": [{"headline": "h", "description": "d", "cta": "c", "style": "s", "dimensions": "300x250"}],
        "landing_page": {"hero_headline": "h", "sub_headline": "s", "cta_text": "c", "sections": []}
    }"#;

    fn candidate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[test]
    fn test_strip_code_fences_variants() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```json {\"a\":1} ```  "), "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_generate_campaign_parses_fenced_json() {
        let server = MockServer::start().await;
        let fenced = format!("```json\n{}\n```", DOC_JSON);
        Mock::given(method("POST"))
            .and(path_regex(r"/models/.*:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&fenced)))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key", server.uri()).unwrap();
        let doc = client.generate_campaign("bottle", "hikers").await.unwrap();
        assert_eq!(doc.video_prompt, "a bottle on a rock");
        assert_eq!(doc.banner_ads.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_campaign_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"/models/.*:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(candidate_body("sorry, no JSON today")),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key", server.uri()).unwrap();
        let result = client.generate_campaign("bottle", "hikers").await;
        assert!(matches!(result, Err(GenAiError::TextFailed(_))));
    }

    #[tokio::test]
    async fn test_generate_campaign_rejects_empty_video_prompt() {
        let server = MockServer::start().await;
        let doc = DOC_JSON.replace("a bottle on a rock", "  ");
        Mock::given(method("POST"))
            .and(path_regex(r"/models/.*:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&doc)))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key", server.uri()).unwrap();
        let result = client.generate_campaign("bottle", "hikers").await;
        assert!(matches!(result, Err(GenAiError::InvalidDocument(_))));
    }

    #[tokio::test]
    async fn test_generate_campaign_propagates_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"/models/.*:generateContent"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("test-key", server.uri()).unwrap();
        let result = client.generate_campaign("bottle", "hikers").await;
        assert!(matches!(result, Err(GenAiError::TextFailed(_))));
    }
}
