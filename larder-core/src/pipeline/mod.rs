//! The recipe pipeline.
//!
//! - Stages implement the `Stage` trait and each own one typed section of
//!   `PipelineState`
//! - The route is fixed by the transition table in `graph`; the only branch
//!   is the alternate recipe, chosen by `RecipeRequest::generate_alternate`
//! - `RecipePipeline` wires the seven stages to a provider and feedback log

mod executor;
mod graph;
mod runner;
mod stage;
mod state;
pub mod stages;

pub use executor::{run_pipeline, StageRegistry};
pub use graph::{next_stage, route, StageName, ENTRY_STAGE};
pub use runner::{GenerateResponse, RecipePipeline};
pub use stage::{Stage, StageMetadata};
pub use state::{
    FeedbackOutput, PipelineState, RecipeOutput, RecipeRequest, TimeEstimate, DEFAULT_MAX_TIME,
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::feedback::{CsvFeedbackStore, FeedbackLogger};
    use crate::llm::FakeProvider;

    fn pipeline() -> RecipePipeline {
        let store = Arc::new(CsvFeedbackStore::new("unused-feedback.csv"));
        RecipePipeline::new(Arc::new(FakeProvider::default()), FeedbackLogger::new(store))
    }

    #[test]
    fn stage_names_are_unique() {
        let names: Vec<StageName> = pipeline().stages().iter().map(|m| m.name).collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), 7);
        assert_eq!(
            names.len(),
            unique.len(),
            "Duplicate stage names detected! Names: {:?}",
            names
        );
    }

    #[test]
    fn stage_writes_are_disjoint() {
        let mut seen = HashSet::new();
        for meta in pipeline().stages() {
            for key in meta.writes {
                assert!(
                    seen.insert(*key),
                    "{} is written by more than one stage (again by {})",
                    key,
                    meta.name
                );
            }
            assert!(!meta.writes.contains(&meta.name.completion_key()));
        }
    }

    #[test]
    fn stage_reads_come_from_request_or_earlier_stages() {
        let request_keys = [
            "ingredients",
            "dietary_preferences",
            "max_time",
            "generate_alternate",
            "feedback_type",
        ];
        let stages = pipeline().stages();

        for generate_alternate in [false, true] {
            let mut available: HashSet<&str> = request_keys.into_iter().collect();
            for name in route(generate_alternate) {
                let meta = stages.iter().find(|m| m.name == name).unwrap();
                for key in meta.reads {
                    assert!(
                        available.contains(key),
                        "{} reads {} before it is written",
                        name,
                        key
                    );
                }
                available.extend(meta.writes.iter().copied());
            }
        }
    }
}
