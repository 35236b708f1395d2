use thiserror::Error;

use crate::llm::LlmError;
use crate::pipeline::StageName;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Text generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("No stage registered for {0}")]
    NotRegistered(StageName),
}

/// A pipeline run aborted. No partial state is returned with it.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: StageName,
    pub source: StageError,
}
