//! Service wiring.
//!
//! Builds the production orchestrator from environment configuration and
//! exposes the pieces the HTTP layer and the shutdown path need.

use std::sync::Arc;

use tracing::info;

use adforge_firestore::{CampaignRepository, FirestoreClient};
use adforge_genai::GeminiClient;
use adforge_models::{CampaignId, GenerationSummary};
use adforge_storage::R2Client;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::orchestrator::Orchestrator;
use crate::prompt_cache::PromptCache;
use crate::tasks::TaskTracker;

/// The fully wired campaign generation service.
pub struct CampaignService {
    orchestrator: Orchestrator,
    tasks: Arc<TaskTracker>,
}

impl CampaignService {
    pub fn new(orchestrator: Orchestrator, tasks: Arc<TaskTracker>) -> Self {
        Self {
            orchestrator,
            tasks,
        }
    }

    /// Wire up all production clients from the environment.
    pub async fn from_env(config: &EngineConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let gemini = Arc::new(GeminiClient::new()?);
        let storage = Arc::new(R2Client::from_env().await?);
        let firestore = FirestoreClient::from_env().await?;
        let campaigns = Arc::new(CampaignRepository::new(firestore));

        let cache = Arc::new(PromptCache::new(config.cache_capacity));
        let tasks = Arc::new(TaskTracker::new());

        let orchestrator = Orchestrator::new(
            gemini.clone(),
            gemini.clone(),
            gemini,
            storage,
            campaigns,
            cache,
            Arc::clone(&tasks),
            config.poll.clone(),
        );

        info!(
            cache_capacity = config.cache_capacity,
            "Campaign service initialized"
        );

        Ok(Self::new(orchestrator, tasks))
    }

    /// Run one campaign generation request.
    pub async fn generate(
        &self,
        campaign_id: &CampaignId,
        brief: &str,
        target_audience: &str,
        image_prompts: &[String],
    ) -> EngineResult<GenerationSummary> {
        self.orchestrator
            .run(campaign_id, brief, target_audience, image_prompts)
            .await
    }

    /// Background task supervisor, for shutdown draining.
    pub fn tasks(&self) -> Arc<TaskTracker> {
        Arc::clone(&self.tasks)
    }
}
