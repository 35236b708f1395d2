//! Reply parser for the dietary filter stage.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::fields::{delimited_list, MarkerSet};

pub const FILTERED_INGREDIENTS: &str = "FILTERED_INGREDIENTS";
pub const REMOVED_INGREDIENTS: &str = "REMOVED_INGREDIENTS";
pub const SUGGESTED_ALTERNATIVES: &str = "SUGGESTED_ALTERNATIVES";

static MARKERS: LazyLock<MarkerSet> = LazyLock::new(|| {
    MarkerSet::new(&[
        FILTERED_INGREDIENTS,
        REMOVED_INGREDIENTS,
        SUGGESTED_ALTERNATIVES,
    ])
});

/// Ingredients after applying dietary restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterReply {
    pub filtered_ingredients: Vec<String>,
    pub removed_ingredients: Vec<String>,
    pub suggested_alternatives: Vec<String>,
}

impl FilterReply {
    /// Nothing filtered: `ingredients` pass through untouched.
    pub fn passthrough(ingredients: &[String]) -> Self {
        Self {
            filtered_ingredients: ingredients.to_vec(),
            removed_ingredients: Vec::new(),
            suggested_alternatives: Vec::new(),
        }
    }
}

/// Parse a filter reply. A missing `FILTERED_INGREDIENTS` keeps `cleaned`.
pub fn parse_filter_reply(reply: &str, cleaned: &[String]) -> FilterReply {
    let located = MARKERS.locate(reply);
    let fallback = FilterReply::passthrough(cleaned);

    FilterReply {
        filtered_ingredients: located
            .block(FILTERED_INGREDIENTS)
            .map(delimited_list)
            .unwrap_or(fallback.filtered_ingredients),
        removed_ingredients: located
            .block(REMOVED_INGREDIENTS)
            .map(delimited_list)
            .unwrap_or(fallback.removed_ingredients),
        suggested_alternatives: located
            .block(SUGGESTED_ALTERNATIVES)
            .map(delimited_list)
            .unwrap_or(fallback.suggested_alternatives),
    }
}
