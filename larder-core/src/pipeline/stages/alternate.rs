//! Alternate stage - a second dish from the same pantry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::StageError;
use crate::llm::LlmProvider;
use crate::parse::parse_alternate_reply;
use crate::pipeline::{PipelineState, Stage, StageMetadata, StageName};
use crate::prompts::alternate::ALTERNATE_PROMPT_NAME;
use crate::prompts::render_alternate_prompt;

/// Only on the route when the request sets `generate_alternate`.
pub struct AlternateStage {
    provider: Arc<dyn LlmProvider>,
}

impl AlternateStage {
    pub const NAME: StageName = StageName::Alternate;

    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Stage for AlternateStage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            name: Self::NAME,
            description: "Generate an alternate recipe with a different method or cuisine",
            reads: &["recipe_title", "filtered_ingredients", "valid_preferences"],
            writes: &[
                "alternate_recipe_name",
                "alternate_cuisine_style",
                "alternate_ingredients",
                "alternate_instructions",
                "alternate_difficulty",
                "alternate_servings",
                "alternate_flavor_profile",
            ],
            prompt_name: Some(ALTERNATE_PROMPT_NAME),
        }
    }

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError> {
        let prompt = render_alternate_prompt(
            state.recipe_title(),
            state.filtered_ingredients(),
            state.valid_preferences(),
        );

        let reply = self.provider.complete(&prompt).await?;
        debug!(reply = %reply, "Alternate recipe reply");

        state.alternate = Some(parse_alternate_reply(&reply));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use crate::parse::AlternateReply;
    use crate::pipeline::RecipeRequest;

    #[tokio::test]
    async fn test_empty_reply_uses_defaults() {
        let stage = AlternateStage::new(Arc::new(FakeProvider::default()));
        let mut state = PipelineState::new(RecipeRequest::new("rice"));

        stage.run(&mut state).await.unwrap();
        assert_eq!(state.alternate, Some(AlternateReply::default()));
    }
}
