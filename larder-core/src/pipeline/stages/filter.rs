//! Filter stage - drop ingredients that break a dietary restriction.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::StageError;
use crate::llm::LlmProvider;
use crate::parse::{parse_filter_reply, FilterReply};
use crate::pipeline::{PipelineState, Stage, StageMetadata, StageName};
use crate::prompts::filter::FILTER_PROMPT_NAME;
use crate::prompts::render_filter_prompt;

/// Calls the model only when there is at least one valid preference.
pub struct FilterStage {
    provider: Arc<dyn LlmProvider>,
}

impl FilterStage {
    pub const NAME: StageName = StageName::Filter;

    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Stage for FilterStage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            name: Self::NAME,
            description: "Remove ingredients that violate the dietary preferences",
            reads: &["cleaned_ingredients", "valid_preferences"],
            writes: &[
                "filtered_ingredients",
                "removed_ingredients",
                "suggested_alternatives",
            ],
            prompt_name: Some(FILTER_PROMPT_NAME),
        }
    }

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError> {
        let cleaned = state.cleaned_ingredients();
        let preferences = state.valid_preferences();

        let filtered = if preferences.is_empty() {
            debug!("No dietary preferences, keeping every ingredient");
            FilterReply::passthrough(cleaned)
        } else {
            let prompt = render_filter_prompt(cleaned, preferences);
            let reply = self.provider.complete(&prompt).await?;
            debug!(reply = %reply, "Filter reply");
            parse_filter_reply(&reply, cleaned)
        };

        state.filtering = Some(filtered);
        Ok(())
    }
}
