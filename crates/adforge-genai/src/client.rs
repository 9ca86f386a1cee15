//! Shared Gemini API client.

use std::time::Duration;

use reqwest::Client;

use crate::error::{GenAiError, GenAiResult};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text model producing the structured campaign document.
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Image generation model (inline image payloads).
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
/// Long-running video generation model.
pub const VIDEO_MODEL: &str = "veo-3.0-generate-001";

/// Gemini API client, shared by the text, image and video operations.
#[derive(Clone)]
pub struct GeminiClient {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client from the environment.
    pub fn new() -> GenAiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GenAiError::config_error("GEMINI_API_KEY not set"))?;
        Self::with_api_key(api_key)
    }

    /// Create with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> GenAiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("adforge-genai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GenAiError::Network)?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Client against a test server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> GenAiResult<Self> {
        let mut client = Self::with_api_key(api_key)?;
        client.base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(client)
    }

    pub(crate) fn model_url(&self, model: &str, action: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, action, self.api_key
        )
    }
}
