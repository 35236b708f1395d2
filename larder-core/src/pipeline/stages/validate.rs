//! Validate stage - clean up the raw ingredient text and preferences.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::StageError;
use crate::llm::LlmProvider;
use crate::parse::parse_validation_reply;
use crate::pipeline::{PipelineState, Stage, StageMetadata, StageName};
use crate::prompts::render_validate_prompt;
use crate::prompts::validate::VALIDATE_PROMPT_NAME;

pub struct ValidateStage {
    provider: Arc<dyn LlmProvider>,
}

impl ValidateStage {
    pub const NAME: StageName = StageName::Validate;

    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Stage for ValidateStage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            name: Self::NAME,
            description: "Standardize ingredient names and keep real dietary restrictions",
            reads: &["ingredients", "dietary_preferences", "max_time"],
            writes: &["cleaned_ingredients", "valid_preferences", "validation_issues"],
            prompt_name: Some(VALIDATE_PROMPT_NAME),
        }
    }

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError> {
        let request = &state.request;
        let prompt = render_validate_prompt(
            &request.ingredients,
            &request.dietary_preferences,
            request.max_time,
        );

        let reply = self.provider.complete(&prompt).await?;
        debug!(reply = %reply, "Validation reply");

        let parsed = parse_validation_reply(&reply);
        if parsed.cleaned_ingredients.is_empty() {
            warn!("Validation reply had no cleaned ingredients");
        }

        state.validation = Some(parsed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use crate::pipeline::RecipeRequest;

    #[tokio::test]
    async fn test_writes_parsed_reply() {
        let provider = Arc::new(FakeProvider::with_response(
            "input validator",
            "CLEANED_INGREDIENTS: [tomato, onion]\nVALID_PREFERENCES: [vegan]\nISSUES: None",
        ));
        let stage = ValidateStage::new(provider.clone());
        let mut state = PipelineState::new(
            RecipeRequest::new("tomatoe, onion, stapler").with_preferences(["vegan", "sparkly"]),
        );

        stage.run(&mut state).await.unwrap();

        assert_eq!(state.cleaned_ingredients(), ["tomato", "onion"]);
        assert_eq!(state.valid_preferences(), ["vegan"]);
        assert_eq!(provider.call_count(), 1);
        assert!(provider.prompts()[0].contains("tomatoe, onion, stapler"));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let stage = ValidateStage::new(Arc::new(FakeProvider::failing("quota exceeded")));
        let mut state = PipelineState::new(RecipeRequest::new("rice"));

        let err = stage.run(&mut state).await.unwrap_err();
        assert!(matches!(err, StageError::Llm(_)));
        assert!(state.validation.is_none());
    }
}
