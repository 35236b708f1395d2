//! Reply parser for the health tips stage.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::fields::MarkerSet;

pub const NUTRITIONAL_BENEFITS: &str = "NUTRITIONAL_BENEFITS";
pub const HEALTH_TIPS: &str = "HEALTH_TIPS";
pub const HEALTHIER_SUGGESTIONS: &str = "HEALTHIER_SUGGESTIONS";
pub const WARNINGS: &str = "WARNINGS";

static MARKERS: LazyLock<MarkerSet> = LazyLock::new(|| {
    MarkerSet::new(&[
        NUTRITIONAL_BENEFITS,
        HEALTH_TIPS,
        HEALTHIER_SUGGESTIONS,
        WARNINGS,
    ])
});

/// Warning text written when the reply has none.
pub const DEFAULT_WARNINGS: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReply {
    pub nutritional_benefits: String,
    pub health_tips: String,
    pub healthier_suggestions: String,
    #[serde(rename = "health_warnings")]
    pub warnings: String,
}

impl Default for HealthReply {
    fn default() -> Self {
        Self {
            nutritional_benefits: String::new(),
            health_tips: String::new(),
            healthier_suggestions: String::new(),
            warnings: DEFAULT_WARNINGS.to_string(),
        }
    }
}

/// The three prose sections are blocks; warnings are a single line.
pub fn parse_health_reply(reply: &str) -> HealthReply {
    let located = MARKERS.locate(reply);
    let fallback = HealthReply::default();
    let block = |label: &str, default: String| {
        located
            .block(label)
            .map(str::to_string)
            .unwrap_or(default)
    };

    HealthReply {
        nutritional_benefits: block(NUTRITIONAL_BENEFITS, fallback.nutritional_benefits),
        health_tips: block(HEALTH_TIPS, fallback.health_tips),
        healthier_suggestions: block(HEALTHIER_SUGGESTIONS, fallback.healthier_suggestions),
        warnings: located.scalar(WARNINGS).unwrap_or(fallback.warnings),
    }
}
