//! Reply parser for the input validation stage.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::fields::{delimited_list, MarkerSet};

pub const CLEANED_INGREDIENTS: &str = "CLEANED_INGREDIENTS";
pub const VALID_PREFERENCES: &str = "VALID_PREFERENCES";
pub const ISSUES: &str = "ISSUES";

static MARKERS: LazyLock<MarkerSet> =
    LazyLock::new(|| MarkerSet::new(&[CLEANED_INGREDIENTS, VALID_PREFERENCES, ISSUES]));

/// Issue note written when the reply has none.
pub const DEFAULT_ISSUES: &str = "None";

/// Cleaned user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReply {
    pub cleaned_ingredients: Vec<String>,
    pub valid_preferences: Vec<String>,
    #[serde(rename = "validation_issues")]
    pub issues: String,
}

impl Default for ValidationReply {
    fn default() -> Self {
        Self {
            cleaned_ingredients: Vec::new(),
            valid_preferences: Vec::new(),
            issues: DEFAULT_ISSUES.to_string(),
        }
    }
}

pub fn parse_validation_reply(reply: &str) -> ValidationReply {
    let located = MARKERS.locate(reply);
    let fallback = ValidationReply::default();

    ValidationReply {
        cleaned_ingredients: located
            .block(CLEANED_INGREDIENTS)
            .map(delimited_list)
            .unwrap_or(fallback.cleaned_ingredients),
        valid_preferences: located
            .block(VALID_PREFERENCES)
            .map(delimited_list)
            .unwrap_or(fallback.valid_preferences),
        issues: located.scalar(ISSUES).unwrap_or(fallback.issues),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let reply = "CLEANED_INGREDIENTS: [tomato, 'onion', \"garlic\"]\nVALID_PREFERENCES: [vegan]\nISSUES: None";
        let parsed = parse_validation_reply(reply);
        assert_eq!(parsed.cleaned_ingredients, vec!["tomato", "onion", "garlic"]);
        assert_eq!(parsed.valid_preferences, vec!["vegan"]);
        assert_eq!(parsed.issues, "None");
    }

    #[test]
    fn test_list_on_following_line() {
        let reply = "CLEANED_INGREDIENTS:\n[rice, beans]\nVALID_PREFERENCES: []\nISSUES: 'tomatoe' corrected to 'tomato'";
        let parsed = parse_validation_reply(reply);
        assert_eq!(parsed.cleaned_ingredients, vec!["rice", "beans"]);
        assert!(parsed.valid_preferences.is_empty());
        assert_eq!(parsed.issues, "'tomatoe' corrected to 'tomato'");
    }

    #[test]
    fn test_no_markers_gives_fallback() {
        assert_eq!(
            parse_validation_reply("I cannot help with that."),
            ValidationReply::default()
        );
    }

    #[test]
    fn test_partial_reply_keeps_parsed_fields() {
        let parsed = parse_validation_reply("CLEANED_INGREDIENTS: egg, milk");
        assert_eq!(parsed.cleaned_ingredients, vec!["egg", "milk"]);
        assert!(parsed.valid_preferences.is_empty());
        assert_eq!(parsed.issues, "None");
    }
}
