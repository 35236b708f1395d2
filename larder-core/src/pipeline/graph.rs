//! The stage graph: stage names and the transition table.

use std::fmt;

use serde::Serialize;

/// Every stage of the recipe pipeline, in route order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Validate,
    Filter,
    Generate,
    EstimateTime,
    HealthTips,
    Alternate,
    Feedback,
}

/// First stage of every run.
pub const ENTRY_STAGE: StageName = StageName::Validate;

impl StageName {
    pub const ALL: [StageName; 7] = [
        StageName::Validate,
        StageName::Filter,
        StageName::Generate,
        StageName::EstimateTime,
        StageName::HealthTips,
        StageName::Alternate,
        StageName::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Validate => "validate",
            StageName::Filter => "filter",
            StageName::Generate => "generate",
            StageName::EstimateTime => "estimate_time",
            StageName::HealthTips => "health_tips",
            StageName::Alternate => "alternate",
            StageName::Feedback => "feedback",
        }
    }

    /// State key set to `true` once the stage has completed.
    pub fn completion_key(&self) -> &'static str {
        match self {
            StageName::Validate => "validation_complete",
            StageName::Filter => "filtering_complete",
            StageName::Generate => "recipe_complete",
            StageName::EstimateTime => "time_estimation_complete",
            StageName::HealthTips => "health_tips_complete",
            StageName::Alternate => "alternate_recipe_complete",
            StageName::Feedback => "feedback_complete",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition table keyed by (current stage, generate_alternate).
///
/// `None` means the run is finished.
pub fn next_stage(current: StageName, generate_alternate: bool) -> Option<StageName> {
    use StageName::*;

    match (current, generate_alternate) {
        (Validate, _) => Some(Filter),
        (Filter, _) => Some(Generate),
        (Generate, _) => Some(EstimateTime),
        (EstimateTime, _) => Some(HealthTips),
        (HealthTips, true) => Some(Alternate),
        (HealthTips, false) => Some(Feedback),
        (Alternate, _) => Some(Feedback),
        (Feedback, _) => None,
    }
}

/// Stages a run visits, from entry to terminal.
pub fn route(generate_alternate: bool) -> Vec<StageName> {
    let mut stages = Vec::new();
    let mut current = Some(ENTRY_STAGE);
    while let Some(stage) = current {
        stages.push(stage);
        current = next_stage(stage, generate_alternate);
    }
    stages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_route_without_alternate() {
        assert_eq!(
            route(false),
            vec![
                StageName::Validate,
                StageName::Filter,
                StageName::Generate,
                StageName::EstimateTime,
                StageName::HealthTips,
                StageName::Feedback,
            ]
        );
    }

    #[test]
    fn test_route_with_alternate() {
        let stages = route(true);
        assert_eq!(stages.len(), 7);
        assert_eq!(&stages[4..], &[StageName::HealthTips, StageName::Alternate, StageName::Feedback]);
    }

    #[test]
    fn test_feedback_is_terminal_on_both_branches() {
        assert_eq!(next_stage(StageName::Feedback, true), None);
        assert_eq!(next_stage(StageName::Feedback, false), None);
    }

    #[test]
    fn test_names_and_completion_keys_are_unique() {
        let names: HashSet<_> = StageName::ALL.iter().map(|s| s.as_str()).collect();
        let keys: HashSet<_> = StageName::ALL.iter().map(|s| s.completion_key()).collect();
        assert_eq!(names.len(), StageName::ALL.len());
        assert_eq!(keys.len(), StageName::ALL.len());
    }
}
