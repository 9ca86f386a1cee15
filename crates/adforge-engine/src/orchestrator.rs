//! Campaign orchestrator.
//!
//! Fans out the text call and all image workers concurrently, joins them,
//! performs the single batched record write, then hands the video prompt
//! to the background pipeline without awaiting it.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use adforge_models::{CampaignId, GeneratedImage, GenerationSummary};

use crate::config::PollConfig;
use crate::error::{EngineError, EngineResult};
use crate::image_worker::ImageWorker;
use crate::prompt_cache::PromptCache;
use crate::tasks::TaskTracker;
use crate::traits::{AssetStore, CampaignStore, ImageGeneration, TextGeneration, VideoGeneration};
use crate::video_pipeline::VideoPipeline;

pub struct Orchestrator {
    text: Arc<dyn TextGeneration>,
    video: Arc<dyn VideoGeneration>,
    assets: Arc<dyn AssetStore>,
    store: Arc<dyn CampaignStore>,
    worker: ImageWorker,
    tasks: Arc<TaskTracker>,
    poll: PollConfig,
}

impl Orchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: Arc<dyn TextGeneration>,
        images: Arc<dyn ImageGeneration>,
        video: Arc<dyn VideoGeneration>,
        assets: Arc<dyn AssetStore>,
        store: Arc<dyn CampaignStore>,
        cache: Arc<PromptCache>,
        tasks: Arc<TaskTracker>,
        poll: PollConfig,
    ) -> Self {
        let worker = ImageWorker::new(images, Arc::clone(&assets), cache);
        Self {
            text,
            video,
            assets,
            store,
            worker,
            tasks,
            poll,
        }
    }

    /// Run one campaign generation request to its batched write.
    ///
    /// Returns once the write has succeeded; video generation, if any,
    /// continues in the background. A text failure fails the whole run
    /// with no write and no video hand-off.
    pub async fn run(
        &self,
        campaign_id: &CampaignId,
        brief: &str,
        target_audience: &str,
        image_prompts: &[String],
    ) -> EngineResult<GenerationSummary> {
        info!(
            campaign_id = %campaign_id,
            image_prompts = image_prompts.len(),
            "Starting campaign generation"
        );

        // Fan out: the text call and every image worker run concurrently.
        // The join waits for all of them; a slow or failing image prompt
        // never blocks its siblings from finishing internally.
        let text_fut = self.text.generate_campaign(brief, target_audience);
        let images_fut = join_all(
            image_prompts
                .iter()
                .enumerate()
                .map(|(index, prompt)| self.worker.generate(prompt, campaign_id, index)),
        );

        let (text_result, image_results): (_, Vec<GeneratedImage>) =
            tokio::join!(text_fut, images_fut);

        let document = text_result.map_err(|e| {
            error!(campaign_id = %campaign_id, "Text generation failed: {}", e);
            EngineError::Text(e)
        })?;

        // One batched write. The image list is omitted entirely when no
        // images were requested, so unrelated fields are never clobbered
        // with an empty list.
        let images_field = (!image_results.is_empty()).then_some(image_results.as_slice());
        self.store
            .write_generation_result(campaign_id, &document, images_field)
            .await?;

        // Hand off only after the write succeeded; the caller never waits
        // on this task.
        let video_generating = document.has_video_prompt();
        if video_generating {
            let pipeline = VideoPipeline::new(
                Arc::clone(&self.video),
                Arc::clone(&self.assets),
                Arc::clone(&self.store),
                self.poll.clone(),
            );
            let id = campaign_id.clone();
            let prompt = document.video_prompt.clone();
            self.tasks.spawn("video_pipeline", async move {
                let outcome = pipeline.run(&id, &prompt).await;
                info!(campaign_id = %id, ?outcome, "Video pipeline reached terminal state");
            });
        }

        let summary = GenerationSummary::from_results(&image_results, video_generating);
        info!(
            campaign_id = %campaign_id,
            generated = summary.generated_images,
            cached = summary.cached_images,
            total = summary.total_requested,
            video = summary.video_generating,
            "Campaign generation complete"
        );
        Ok(summary)
    }
}
