//! `RecipePipeline`: the seven stages wired to one provider and feedback log.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::feedback::FeedbackLogger;
use crate::llm::LlmProvider;
use crate::pipeline::stages::{
    AlternateStage, EstimateTimeStage, FeedbackStage, FilterStage, GenerateStage,
    HealthTipsStage, ValidateStage,
};
use crate::pipeline::{run_pipeline, PipelineState, RecipeRequest, StageMetadata, StageRegistry};

/// Result of [`RecipePipeline::generate`], tagged by `status`.
///
/// On success every state field sits beside `"status": "success"`; on
/// failure only `error` and `trace` are present.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateResponse {
    Success(Box<PipelineState>),
    Error { error: String, trace: String },
}

impl GenerateResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerateResponse::Success(_))
    }

    pub fn state(&self) -> Option<&PipelineState> {
        match self {
            GenerateResponse::Success(state) => Some(&**state),
            GenerateResponse::Error { .. } => None,
        }
    }
}

impl From<PipelineError> for GenerateResponse {
    fn from(e: PipelineError) -> Self {
        GenerateResponse::Error {
            trace: format!("Recipe generation pipeline aborted at the {} stage", e.stage),
            error: e.to_string(),
        }
    }
}

pub struct RecipePipeline {
    registry: StageRegistry,
}

impl RecipePipeline {
    /// Build the standard pipeline. Every model-backed stage shares `provider`.
    pub fn new(provider: Arc<dyn LlmProvider>, feedback: FeedbackLogger) -> Self {
        let mut registry = StageRegistry::new();
        registry.register(Box::new(ValidateStage::new(provider.clone())));
        registry.register(Box::new(FilterStage::new(provider.clone())));
        registry.register(Box::new(GenerateStage::new(provider.clone())));
        registry.register(Box::new(EstimateTimeStage::new(provider.clone())));
        registry.register(Box::new(HealthTipsStage::new(provider.clone())));
        registry.register(Box::new(AlternateStage::new(provider)));
        registry.register(Box::new(FeedbackStage::new(feedback)));
        Self { registry }
    }

    /// Build a pipeline over a custom set of stages.
    pub fn with_registry(registry: StageRegistry) -> Self {
        Self { registry }
    }

    /// Metadata of every stage, in route order.
    pub fn stages(&self) -> Vec<StageMetadata> {
        self.registry.metadata()
    }

    /// Run one request to completion. A failed stage aborts the run and the
    /// partial state is dropped.
    pub async fn run(&self, request: RecipeRequest) -> Result<PipelineState, PipelineError> {
        let mut state = PipelineState::new(request);
        let ran = run_pipeline(&mut state, &self.registry).await?;
        info!(stages = ran.len(), title = %state.recipe_title(), "Recipe pipeline finished");
        Ok(state)
    }

    /// Like [`run`](Self::run), but folds failure into the response.
    pub async fn generate(&self, request: RecipeRequest) -> GenerateResponse {
        match self.run(request).await {
            Ok(state) => GenerateResponse::Success(Box::new(state)),
            Err(e) => {
                error!("Recipe generation failed: {}", e);
                e.into()
            }
        }
    }
}
