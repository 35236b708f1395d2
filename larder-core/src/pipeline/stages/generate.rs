//! Generate stage - write the recipe and work out what the user still needs.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::StageError;
use crate::llm::LlmProvider;
use crate::parse::{missed_ingredients, parse_recipe_reply};
use crate::pipeline::{PipelineState, RecipeOutput, Stage, StageMetadata, StageName};
use crate::prompts::generate::GENERATE_PROMPT_NAME;
use crate::prompts::render_generate_prompt;

pub struct GenerateStage {
    provider: Arc<dyn LlmProvider>,
}

impl GenerateStage {
    pub const NAME: StageName = StageName::Generate;

    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Stage for GenerateStage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            name: Self::NAME,
            description: "Generate a recipe from the filtered ingredients",
            reads: &["filtered_ingredients", "valid_preferences", "max_time"],
            writes: &[
                "recipe_title",
                "recipe_ingredients",
                "recipe_instructions",
                "additional_ingredients",
                "missed_ingredients",
            ],
            prompt_name: Some(GENERATE_PROMPT_NAME),
        }
    }

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError> {
        let filtered = state.filtered_ingredients();
        let prompt =
            render_generate_prompt(filtered, state.valid_preferences(), state.request.max_time);

        let reply = self.provider.complete(&prompt).await?;
        debug!(reply = %reply, "Recipe reply");

        let recipe = parse_recipe_reply(&reply);
        if recipe.instructions.is_empty() {
            warn!(title = %recipe.title, "Recipe reply had no instructions");
        }
        let missed = missed_ingredients(&recipe.ingredients, filtered);

        state.recipe = Some(RecipeOutput {
            reply: recipe,
            missed_ingredients: missed,
        });
        Ok(())
    }
}
