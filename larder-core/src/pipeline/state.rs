//! The record a run accumulates, one typed section per stage.
//!
//! Serialized, the state is a single flat JSON object: the request fields,
//! then each completed stage's fields, then the completion markers. A section
//! is `None` until its stage has run and is never cleared afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackRecord;
use crate::parse::{AlternateReply, FilterReply, HealthReply, RecipeReply, ValidationReply};
use crate::pipeline::StageName;

/// Time budget used when the caller gives none.
pub const DEFAULT_MAX_TIME: u32 = 60;

fn default_max_time() -> u32 {
    DEFAULT_MAX_TIME
}

/// What the caller asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Ingredients as the user typed them
    pub ingredients: String,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    /// Minutes available
    #[serde(default = "default_max_time")]
    pub max_time: u32,
    #[serde(default)]
    pub generate_alternate: bool,
    /// "thumbs_up" or "thumbs_down" to log feedback at the end of the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_type: Option<String>,
}

impl RecipeRequest {
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            dietary_preferences: Vec::new(),
            max_time: DEFAULT_MAX_TIME,
            generate_alternate: false,
            feedback_type: None,
        }
    }

    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dietary_preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_time(mut self, minutes: u32) -> Self {
        self.max_time = minutes;
        self
    }

    pub fn with_alternate(mut self, generate_alternate: bool) -> Self {
        self.generate_alternate = generate_alternate;
        self
    }

    pub fn with_feedback(mut self, feedback_type: impl Into<String>) -> Self {
        self.feedback_type = Some(feedback_type.into());
        self
    }
}

/// Generated recipe plus what the user still has to buy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeOutput {
    #[serde(flatten)]
    pub reply: RecipeReply,
    pub missed_ingredients: Vec<String>,
}

/// `None` when there were no instructions or the reply had no minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeEstimate {
    pub estimated_cook_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackOutput {
    pub feedback_logged: bool,
    pub feedback_record: Option<FeedbackRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    #[serde(flatten)]
    pub request: RecipeRequest,
    #[serde(flatten)]
    pub validation: Option<ValidationReply>,
    #[serde(flatten)]
    pub filtering: Option<FilterReply>,
    #[serde(flatten)]
    pub recipe: Option<RecipeOutput>,
    #[serde(flatten)]
    pub time_estimate: Option<TimeEstimate>,
    #[serde(flatten)]
    pub health: Option<HealthReply>,
    #[serde(flatten)]
    pub alternate: Option<AlternateReply>,
    #[serde(flatten)]
    pub feedback: Option<FeedbackOutput>,
    #[serde(flatten)]
    completed: BTreeMap<&'static str, bool>,
}

impl PipelineState {
    pub fn new(request: RecipeRequest) -> Self {
        Self {
            request,
            validation: None,
            filtering: None,
            recipe: None,
            time_estimate: None,
            health: None,
            alternate: None,
            feedback: None,
            completed: BTreeMap::new(),
        }
    }

    pub fn cleaned_ingredients(&self) -> &[String] {
        self.validation
            .as_ref()
            .map(|v| v.cleaned_ingredients.as_slice())
            .unwrap_or(&[])
    }

    pub fn valid_preferences(&self) -> &[String] {
        self.validation
            .as_ref()
            .map(|v| v.valid_preferences.as_slice())
            .unwrap_or(&[])
    }

    pub fn filtered_ingredients(&self) -> &[String] {
        self.filtering
            .as_ref()
            .map(|f| f.filtered_ingredients.as_slice())
            .unwrap_or(&[])
    }

    /// Empty until the generate stage has run.
    pub fn recipe_title(&self) -> &str {
        self.recipe
            .as_ref()
            .map(|r| r.reply.title.as_str())
            .unwrap_or("")
    }

    pub fn recipe_instructions(&self) -> &[String] {
        self.recipe
            .as_ref()
            .map(|r| r.reply.instructions.as_slice())
            .unwrap_or(&[])
    }

    pub fn estimated_cook_time(&self) -> Option<u32> {
        self.time_estimate.and_then(|t| t.estimated_cook_time)
    }

    pub fn feedback_logged(&self) -> bool {
        self.feedback.as_ref().is_some_and(|f| f.feedback_logged)
    }

    pub fn is_complete(&self, stage: StageName) -> bool {
        self.completed
            .get(stage.completion_key())
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn mark_complete(&mut self, stage: StageName) {
        self.completed.insert(stage.completion_key(), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults_from_json() {
        let request: RecipeRequest = serde_json::from_value(json!({"ingredients": "rice"})).unwrap();
        assert_eq!(request, RecipeRequest::new("rice"));
        assert_eq!(request.max_time, 60);
        assert!(request.dietary_preferences.is_empty());
    }

    #[test]
    fn test_fresh_state_serializes_request_only() {
        let state = PipelineState::new(RecipeRequest::new("rice, beans").with_max_time(20));
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "ingredients": "rice, beans",
                "dietary_preferences": [],
                "max_time": 20,
                "generate_alternate": false,
            })
        );
    }

    #[test]
    fn test_sections_flatten_into_one_object() {
        let mut state = PipelineState::new(RecipeRequest::new("rice"));
        state.validation = Some(ValidationReply::default());
        state.time_estimate = Some(TimeEstimate {
            estimated_cook_time: None,
        });
        state.mark_complete(StageName::Validate);
        state.mark_complete(StageName::EstimateTime);

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["cleaned_ingredients"], json!([]));
        assert_eq!(value["validation_issues"], json!("None"));
        assert_eq!(value["estimated_cook_time"], json!(null));
        assert_eq!(value["validation_complete"], json!(true));
        assert_eq!(value["time_estimation_complete"], json!(true));
        assert!(value.get("recipe_title").is_none());
        assert!(value.get("alternate_recipe_complete").is_none());
    }

    #[test]
    fn test_accessors_default_when_unset() {
        let state = PipelineState::new(RecipeRequest::new("rice"));
        assert!(state.filtered_ingredients().is_empty());
        assert_eq!(state.recipe_title(), "");
        assert_eq!(state.estimated_cook_time(), None);
        assert!(!state.feedback_logged());
        assert!(!state.is_complete(StageName::Validate));
    }
}
