//! Firestore REST API client.
//!
//! Covers the two operations the record store needs: reading a campaign
//! document and patching it with an update mask (partial update, never a
//! full replace).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::{Client, StatusCode};
use tracing::{debug, info_span, Instrument};

use crate::error::{FirestoreError, FirestoreResult};
use crate::retry::RetryConfig;
use crate::token_cache::TokenCache;
use crate::types::{Document, Value};

/// Firestore client configuration.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// GCP project ID
    pub project_id: String,
    /// Database ID (usually "(default)")
    pub database_id: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
}

impl FirestoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> FirestoreResult<Self> {
        let project_id = std::env::var("GCP_PROJECT_ID")
            .or_else(|_| std::env::var("FIREBASE_PROJECT_ID"))
            .map_err(|_| {
                FirestoreError::auth_error(
                    "GCP_PROJECT_ID or FIREBASE_PROJECT_ID must be set to access Firestore",
                )
            })?;

        if project_id.is_empty() {
            return Err(FirestoreError::auth_error(
                "GCP_PROJECT_ID or FIREBASE_PROJECT_ID cannot be empty",
            ));
        }

        let connect_timeout_secs: u64 = std::env::var("FIRESTORE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            project_id,
            database_id: std::env::var("FIRESTORE_DATABASE_ID")
                .unwrap_or_else(|_| "(default)".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            retry: RetryConfig::from_env(),
        })
    }
}

enum AuthMode {
    /// Cached OAuth tokens from a service account.
    Gcp(Arc<TokenCache>),
    /// Fixed token, for the emulator and HTTP-level tests.
    Static(String),
}

/// Firestore REST API client.
pub struct FirestoreClient {
    http: Client,
    retry: RetryConfig,
    base_url: String,
    auth: Arc<AuthMode>,
}

impl Clone for FirestoreClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            retry: self.retry.clone(),
            base_url: self.base_url.clone(),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl FirestoreClient {
    /// Create a new Firestore client.
    pub async fn new(config: FirestoreConfig) -> FirestoreResult<Self> {
        let auth = Self::create_auth_provider()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("adforge-firestore/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FirestoreError::Network)?;

        let base_url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/{}/documents",
            config.project_id, config.database_id
        );

        Ok(Self {
            http,
            retry: config.retry,
            base_url,
            auth: Arc::new(AuthMode::Gcp(Arc::new(TokenCache::new(auth)))),
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> FirestoreResult<Self> {
        let config = FirestoreConfig::from_env()?;
        Self::new(config).await
    }

    /// Client against an emulator or test server, with a fixed token.
    pub fn with_base_url(base_url: impl Into<String>) -> FirestoreResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(FirestoreError::Network)?;

        Ok(Self {
            http,
            retry: RetryConfig {
                max_retries: 1,
                base_delay_ms: 1,
                max_delay_ms: 10,
            },
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: Arc::new(AuthMode::Static("owner".to_string())),
        })
    }

    fn create_auth_provider() -> FirestoreResult<Arc<dyn TokenProvider>> {
        let service_account = CustomServiceAccount::from_env().map_err(|e| {
            FirestoreError::auth_error(format!("Failed to load service account: {}", e))
        })?;

        match service_account {
            Some(sa) => Ok(Arc::new(sa)),
            None => Err(FirestoreError::auth_error(
                "GOOGLE_APPLICATION_CREDENTIALS not set. \
                 Set it to the path of your service account JSON file.",
            )),
        }
    }

    async fn get_token(&self) -> FirestoreResult<String> {
        match self.auth.as_ref() {
            AuthMode::Gcp(cache) => cache.get_token().await,
            AuthMode::Static(token) => Ok(token.clone()),
        }
    }

    async fn invalidate_token(&self) {
        if let AuthMode::Gcp(cache) = self.auth.as_ref() {
            cache.invalidate().await;
        }
    }

    fn is_access_token_expired(body: &str) -> bool {
        body.contains("ACCESS_TOKEN_EXPIRED") || body.contains("\"UNAUTHENTICATED\"")
    }

    /// Build document path.
    fn document_path(&self, collection: &str, doc_id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, doc_id)
    }

    /// Get a document.
    pub async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> FirestoreResult<Option<Document>> {
        let url = self.document_path(collection, doc_id);

        self.execute_request("get_document", collection, doc_id, async {
            let mut token = self.get_token().await?;
            let mut response = self.http.get(&url).bearer_auth(&token).send().await?;
            let mut status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                let body = response.text().await.unwrap_or_default();
                if Self::is_access_token_expired(&body) {
                    self.invalidate_token().await;
                    token = self.get_token().await?;
                    response = self.http.get(&url).bearer_auth(&token).send().await?;
                    status = response.status();
                } else {
                    return Err(FirestoreError::from_http_status(
                        status.as_u16(),
                        format!("{} failed: {}", url, body),
                    ));
                }
            }

            match status {
                StatusCode::OK => {
                    let doc: Document = response.json().await?;
                    Ok(Some(doc))
                }
                StatusCode::NOT_FOUND => Ok(None),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Update a document (merge).
    ///
    /// With an update mask only the named field paths are touched; this is
    /// how the orchestrator writes `result`/`generated_images` without
    /// clobbering the rest of the campaign record.
    pub async fn update_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
        update_mask: Option<Vec<String>>,
    ) -> FirestoreResult<Document> {
        let mut url = self.document_path(collection, doc_id);
        if let Some(mask) = update_mask {
            let params: Vec<String> = mask
                .iter()
                .map(|f| format!("updateMask.fieldPaths={}", f))
                .collect();
            url = format!("{}?{}", url, params.join("&"));
        }

        let body = Document::new(fields);

        self.execute_request("update_document", collection, doc_id, async {
            let mut token = self.get_token().await?;
            let mut response = self
                .http
                .patch(&url)
                .bearer_auth(&token)
                .json(&body)
                .send()
                .await?;
            let mut status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                let body_text = response.text().await.unwrap_or_default();
                if Self::is_access_token_expired(&body_text) {
                    self.invalidate_token().await;
                    token = self.get_token().await?;
                    response = self
                        .http
                        .patch(&url)
                        .bearer_auth(&token)
                        .json(&body)
                        .send()
                        .await?;
                    status = response.status();
                } else {
                    return Err(FirestoreError::from_http_status(
                        status.as_u16(),
                        format!("{} failed: {}", url, body_text),
                    ));
                }
            }

            match status {
                StatusCode::OK => {
                    let doc: Document = response.json().await?;
                    Ok(doc)
                }
                StatusCode::NOT_FOUND => Err(FirestoreError::not_found(format!(
                    "{}/{}",
                    collection, doc_id
                ))),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Retry config used by repositories wrapping this client.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    async fn execute_request<T, F>(
        &self,
        operation: &str,
        collection: &str,
        doc_id: &str,
        fut: F,
    ) -> FirestoreResult<T>
    where
        F: std::future::Future<Output = FirestoreResult<T>>,
    {
        let span = info_span!("firestore_request", operation = %operation, collection = %collection, doc_id = %doc_id);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        debug!(
            operation = %operation,
            latency_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Firestore request finished"
        );

        result
    }

    async fn handle_error_response(
        status: StatusCode,
        url: &str,
        response: reqwest::Response,
    ) -> FirestoreError {
        let body = response.text().await.unwrap_or_default();
        FirestoreError::from_http_status(status.as_u16(), format!("{} failed: {}", url, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn doc_body() -> serde_json::Value {
        serde_json::json!({
            "name": "projects/p/databases/(default)/documents/campaigns/c1",
            "fields": {
                "generated_video_url": { "stringValue": "https://cdn/v.mp4" }
            }
        })
    }

    #[tokio::test]
    async fn test_get_document_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/campaigns/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(doc_body()))
            .mount(&server)
            .await;

        let client = FirestoreClient::with_base_url(server.uri()).unwrap();
        let doc = client.get_document("campaigns", "c1").await.unwrap();
        assert!(doc.is_some());
        assert!(doc.unwrap().fields.unwrap().contains_key("generated_video_url"));
    }

    #[tokio::test]
    async fn test_get_document_missing_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/campaigns/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = FirestoreClient::with_base_url(server.uri()).unwrap();
        let doc = client.get_document("campaigns", "nope").await.unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn test_update_document_sends_update_mask() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/campaigns/c1"))
            .and(query_param("updateMask.fieldPaths", "generated_video_url"))
            .respond_with(ResponseTemplate::new(200).set_body_json(doc_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = FirestoreClient::with_base_url(server.uri()).unwrap();
        let mut fields = HashMap::new();
        fields.insert(
            "generated_video_url".to_string(),
            Value::StringValue("https://cdn/v.mp4".to_string()),
        );
        let result = client
            .update_document(
                "campaigns",
                "c1",
                fields,
                Some(vec!["generated_video_url".to_string()]),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_document_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/campaigns/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = FirestoreClient::with_base_url(server.uri()).unwrap();
        let result = client
            .update_document("campaigns", "ghost", HashMap::new(), None)
            .await;
        assert!(matches!(result, Err(FirestoreError::NotFound(_))));
    }
}
