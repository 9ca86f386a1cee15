//! HTTP entry point.
//!
//! A single generation route plus a health probe. The UI layer reads
//! everything else straight from the record store, so this surface stays
//! deliberately narrow.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::error;

use adforge_models::CampaignId;

use crate::service::CampaignService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CampaignService>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub campaign_id: String,
    pub campaign_prompt: String,
    pub target_audience: String,
    #[serde(default)]
    pub image_prompts: Vec<String>,
}

#[derive(Serialize)]
struct FailureResponse {
    success: bool,
    message: String,
}

impl FailureResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            message: msg.into(),
        }
    }
}

/// Create the engine router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/campaigns/generate", post(generate_campaign))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn generate_campaign(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    if request.campaign_id.trim().is_empty() || request.campaign_prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(FailureResponse::new(
                "campaign_id and campaign_prompt are required",
            )),
        )
            .into_response();
    }

    let campaign_id = CampaignId::from_string(request.campaign_id);
    match state
        .service
        .generate(
            &campaign_id,
            &request.campaign_prompt,
            &request.target_audience,
            &request.image_prompts,
        )
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            error!(campaign_id = %campaign_id, "Campaign generation failed: {}", e);
            // Upstream details stay in the logs, not on the wire
            (
                StatusCode::BAD_GATEWAY,
                Json(FailureResponse::new("Campaign generation failed")),
            )
                .into_response()
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
