//! Health tips stage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::StageError;
use crate::llm::LlmProvider;
use crate::parse::parse_health_reply;
use crate::pipeline::{PipelineState, Stage, StageMetadata, StageName};
use crate::prompts::health_tips::HEALTH_TIPS_PROMPT_NAME;
use crate::prompts::render_health_tips_prompt;

pub struct HealthTipsStage {
    provider: Arc<dyn LlmProvider>,
}

impl HealthTipsStage {
    pub const NAME: StageName = StageName::HealthTips;

    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Stage for HealthTipsStage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            name: Self::NAME,
            description: "Nutritional benefits, tips and warnings for the recipe",
            reads: &["recipe_title", "filtered_ingredients", "valid_preferences"],
            writes: &[
                "nutritional_benefits",
                "health_tips",
                "healthier_suggestions",
                "health_warnings",
            ],
            prompt_name: Some(HEALTH_TIPS_PROMPT_NAME),
        }
    }

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError> {
        let prompt = render_health_tips_prompt(
            state.recipe_title(),
            state.filtered_ingredients(),
            state.valid_preferences(),
        );

        let reply = self.provider.complete(&prompt).await?;
        debug!(reply = %reply, "Health tips reply");

        state.health = Some(parse_health_reply(&reply));
        Ok(())
    }
}
