//! Estimate time stage - total minutes for the recipe's instructions.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::StageError;
use crate::llm::LlmProvider;
use crate::parse::parse_minutes;
use crate::pipeline::{PipelineState, Stage, StageMetadata, StageName, TimeEstimate};
use crate::prompts::estimate_time::ESTIMATE_TIME_PROMPT_NAME;
use crate::prompts::render_estimate_time_prompt;

/// Writes a null estimate, without calling the model, when there are no
/// instructions to time.
pub struct EstimateTimeStage {
    provider: Arc<dyn LlmProvider>,
}

impl EstimateTimeStage {
    pub const NAME: StageName = StageName::EstimateTime;

    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Stage for EstimateTimeStage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            name: Self::NAME,
            description: "Estimate total cooking time from the instructions",
            reads: &["recipe_instructions"],
            writes: &["estimated_cook_time"],
            prompt_name: Some(ESTIMATE_TIME_PROMPT_NAME),
        }
    }

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError> {
        let instructions = state.recipe_instructions();

        let estimated_cook_time = if instructions.is_empty() {
            debug!("No instructions to time");
            None
        } else {
            let prompt = render_estimate_time_prompt(instructions);
            let reply = self.provider.complete(&prompt).await?;
            debug!(reply = %reply, "Time estimate reply");

            let minutes = parse_minutes(&reply);
            if minutes.is_none() {
                warn!("Time estimate reply had no minutes");
            }
            minutes
        };

        state.time_estimate = Some(TimeEstimate {
            estimated_cook_time,
        });
        Ok(())
    }
}
