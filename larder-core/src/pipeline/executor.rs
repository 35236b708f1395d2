//! Pipeline executor and stage registry.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{info, info_span, Instrument};

use crate::error::{PipelineError, StageError};
use crate::pipeline::graph::{next_stage, ENTRY_STAGE};
use crate::pipeline::{PipelineState, Stage, StageMetadata, StageName};

/// Registry that maps stage names to their implementations.
pub struct StageRegistry {
    stages: HashMap<StageName, Box<dyn Stage>>,
}

impl StageRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            stages: HashMap::new(),
        }
    }

    /// Register a stage implementation, replacing any stage of the same name.
    pub fn register(&mut self, stage: Box<dyn Stage>) {
        self.stages.insert(stage.metadata().name, stage);
    }

    /// Get a stage by name.
    pub fn get(&self, name: StageName) -> Option<&dyn Stage> {
        self.stages.get(&name).map(|s| s.as_ref())
    }

    /// Metadata of every registered stage, in route order.
    pub fn metadata(&self) -> Vec<StageMetadata> {
        StageName::ALL
            .iter()
            .filter_map(|name| self.get(*name).map(|s| s.metadata()))
            .collect()
    }
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run every stage on the route, starting from the entry stage.
///
/// Stages run one at a time. The first failure stops the run; the stages
/// that already completed are not undone, but the caller should treat the
/// state as discarded. Returns the stages that ran, in order.
pub async fn run_pipeline(
    state: &mut PipelineState,
    registry: &StageRegistry,
) -> Result<Vec<StageName>, PipelineError> {
    let mut ran = Vec::new();
    let mut current = Some(ENTRY_STAGE);

    while let Some(name) = current {
        let stage = registry.get(name).ok_or(PipelineError {
            stage: name,
            source: StageError::NotRegistered(name),
        })?;

        let start = Instant::now();
        info!("Running {} stage", name);
        stage
            .run(state)
            .instrument(info_span!("pipeline_stage", stage = %name))
            .await
            .map_err(|source| PipelineError {
                stage: name,
                source,
            })?;

        state.mark_complete(name);
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Finished {} stage", name
        );
        ran.push(name);

        current = next_stage(name, state.request.generate_alternate);
    }

    Ok(ran)
}
