//! Feedback stage - append the user's thumbs up/down to the feedback log.

use async_trait::async_trait;
use tracing::debug;

use crate::error::StageError;
use crate::feedback::FeedbackLogger;
use crate::pipeline::{FeedbackOutput, PipelineState, Stage, StageMetadata, StageName};

/// Terminal stage. Never fails: a missing or unknown feedback type, or a
/// store error, leaves `feedback_logged` false.
pub struct FeedbackStage {
    logger: FeedbackLogger,
}

impl FeedbackStage {
    pub const NAME: StageName = StageName::Feedback;

    pub fn new(logger: FeedbackLogger) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl Stage for FeedbackStage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            name: Self::NAME,
            description: "Log user feedback for the recipe",
            reads: &[
                "feedback_type",
                "recipe_title",
                "filtered_ingredients",
                "valid_preferences",
                "estimated_cook_time",
            ],
            writes: &["feedback_logged", "feedback_record"],
            prompt_name: None,
        }
    }

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError> {
        let record = match state.request.feedback_type.as_deref() {
            Some(feedback_type) => self.logger.log(
                feedback_type,
                state.recipe_title(),
                state.filtered_ingredients(),
                state.valid_preferences(),
                state.estimated_cook_time(),
            ),
            None => {
                debug!("No feedback given");
                None
            }
        };

        state.feedback = Some(FeedbackOutput {
            feedback_logged: record.is_some(),
            feedback_record: record,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::feedback::{CsvFeedbackStore, FeedbackCategory, FeedbackStore};
    use crate::pipeline::RecipeRequest;

    fn stage_in(dir: &TempDir) -> (FeedbackStage, Arc<CsvFeedbackStore>) {
        let store = Arc::new(CsvFeedbackStore::new(dir.path().join("feedback.csv")));
        (FeedbackStage::new(FeedbackLogger::new(store.clone())), store)
    }

    #[tokio::test]
    async fn test_logs_valid_feedback() {
        let dir = TempDir::new().unwrap();
        let (stage, store) = stage_in(&dir);
        let mut state = PipelineState::new(RecipeRequest::new("rice").with_feedback("thumbs_down"));

        stage.run(&mut state).await.unwrap();

        assert!(state.feedback_logged());
        let records = store.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].feedback_type, FeedbackCategory::ThumbsDown);
        assert_eq!(records[0].recipe_name, "Unknown");
    }

    #[tokio::test]
    async fn test_invalid_feedback_is_not_logged() {
        let dir = TempDir::new().unwrap();
        let (stage, store) = stage_in(&dir);
        let mut state = PipelineState::new(RecipeRequest::new("rice").with_feedback("five_stars"));

        stage.run(&mut state).await.unwrap();

        assert!(!state.feedback_logged());
        assert!(state.feedback.is_some());
        assert!(store.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_feedback_is_not_logged() {
        let dir = TempDir::new().unwrap();
        let (stage, store) = stage_in(&dir);
        let mut state = PipelineState::new(RecipeRequest::new("rice"));

        stage.run(&mut state).await.unwrap();

        assert!(!state.feedback_logged());
        assert!(store.read_all().unwrap().is_empty());
    }
}
