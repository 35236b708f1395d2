//! Stage trait and supporting types.

use async_trait::async_trait;

use crate::error::StageError;
use crate::pipeline::{PipelineState, StageName};

/// Metadata about a pipeline stage.
#[derive(Debug, Clone)]
pub struct StageMetadata {
    pub name: StageName,
    /// Human-readable description
    pub description: &'static str,
    /// State keys the stage reads
    pub reads: &'static [&'static str],
    /// State keys the stage writes, not counting its completion marker
    pub writes: &'static [&'static str],
    /// Prompt template used, if the stage calls the model
    pub prompt_name: Option<&'static str>,
}

/// A unit of the recipe pipeline.
///
/// Stages are stateless: built once, then run against each run's state. A
/// stage must leave every key it writes populated when it returns `Ok`.
#[async_trait]
pub trait Stage: Send + Sync {
    fn metadata(&self) -> StageMetadata;

    async fn run(&self, state: &mut PipelineState) -> Result<(), StageError>;
}
