//! Reply parser for the recipe generation stage, plus the missed-ingredient rule.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::fields::{itemized_list, Bullet, MarkerSet};

pub const TITLE: &str = "TITLE";
pub const INGREDIENTS: &str = "INGREDIENTS";
pub const INSTRUCTIONS: &str = "INSTRUCTIONS";
pub const ADDITIONAL_INGREDIENTS: &str = "ADDITIONAL INGREDIENTS NEEDED";

static MARKERS: LazyLock<MarkerSet> = LazyLock::new(|| {
    MarkerSet::new(&[TITLE, INGREDIENTS, INSTRUCTIONS, ADDITIONAL_INGREDIENTS])
});

/// Title used when the reply has none.
pub const DEFAULT_TITLE: &str = "Delicious Recipe";

/// A generated recipe as read from the model's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeReply {
    #[serde(rename = "recipe_title")]
    pub title: String,
    #[serde(rename = "recipe_ingredients")]
    pub ingredients: Vec<String>,
    #[serde(rename = "recipe_instructions")]
    pub instructions: Vec<String>,
    pub additional_ingredients: Vec<String>,
}

impl Default for RecipeReply {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            additional_ingredients: Vec::new(),
        }
    }
}

pub fn parse_recipe_reply(reply: &str) -> RecipeReply {
    let located = MARKERS.locate(reply);
    let fallback = RecipeReply::default();

    RecipeReply {
        title: located.scalar(TITLE).unwrap_or(fallback.title),
        ingredients: located
            .block(INGREDIENTS)
            .map(|block| itemized_list(block, Bullet::Hyphen))
            .unwrap_or(fallback.ingredients),
        instructions: located
            .block(INSTRUCTIONS)
            .map(|block| itemized_list(block, Bullet::Numbered))
            .unwrap_or(fallback.instructions),
        additional_ingredients: located
            .block(ADDITIONAL_INGREDIENTS)
            .map(|block| itemized_list(block, Bullet::Hyphen))
            .unwrap_or(fallback.additional_ingredients),
    }
}

/// Recipe ingredients the user has to buy.
///
/// A recipe ingredient is covered when its lowercased text contains any of
/// the user's lowercased ingredients as a substring, so "2 diced onions" is
/// covered by "onion". Blank user ingredients cover nothing.
pub fn missed_ingredients(recipe_ingredients: &[String], user_ingredients: &[String]) -> Vec<String> {
    let owned: Vec<String> = user_ingredients
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();

    recipe_ingredients
        .iter()
        .filter(|ingredient| {
            let lower = ingredient.to_lowercase();
            !owned.iter().any(|o| lower.contains(o.as_str()))
        })
        .cloned()
        .collect()
}
