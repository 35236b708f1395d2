//! Reply parser for the alternate recipe stage.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::fields::{itemized_list, Bullet, MarkerSet};

pub const ALTERNATE_RECIPE_NAME: &str = "ALTERNATE_RECIPE_NAME";
pub const CUISINE_STYLE: &str = "CUISINE_STYLE";
pub const INGREDIENTS_NEEDED: &str = "INGREDIENTS_NEEDED";
pub const INSTRUCTIONS: &str = "INSTRUCTIONS";
pub const DIFFICULTY: &str = "DIFFICULTY";
pub const SERVINGS: &str = "SERVINGS";
pub const FLAVOR_PROFILE: &str = "FLAVOR_PROFILE";

static MARKERS: LazyLock<MarkerSet> = LazyLock::new(|| {
    MarkerSet::new(&[
        ALTERNATE_RECIPE_NAME,
        CUISINE_STYLE,
        INGREDIENTS_NEEDED,
        INSTRUCTIONS,
        DIFFICULTY,
        SERVINGS,
        FLAVOR_PROFILE,
    ])
});

pub const DEFAULT_NAME: &str = "Alternative Recipe";
pub const DEFAULT_CUISINE_STYLE: &str = "Fusion";
pub const DEFAULT_DIFFICULTY: &str = "Medium";
pub const DEFAULT_SERVINGS: &str = "4";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateReply {
    #[serde(rename = "alternate_recipe_name")]
    pub name: String,
    #[serde(rename = "alternate_cuisine_style")]
    pub cuisine_style: String,
    #[serde(rename = "alternate_ingredients")]
    pub ingredients: Vec<String>,
    #[serde(rename = "alternate_instructions")]
    pub instructions: Vec<String>,
    #[serde(rename = "alternate_difficulty")]
    pub difficulty: String,
    #[serde(rename = "alternate_servings")]
    pub servings: String,
    #[serde(rename = "alternate_flavor_profile")]
    pub flavor_profile: String,
}

impl Default for AlternateReply {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            cuisine_style: DEFAULT_CUISINE_STYLE.to_string(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            servings: DEFAULT_SERVINGS.to_string(),
            flavor_profile: String::new(),
        }
    }
}

pub fn parse_alternate_reply(reply: &str) -> AlternateReply {
    let located = MARKERS.locate(reply);
    let fallback = AlternateReply::default();

    AlternateReply {
        name: located.scalar(ALTERNATE_RECIPE_NAME).unwrap_or(fallback.name),
        cuisine_style: located
            .scalar(CUISINE_STYLE)
            .unwrap_or(fallback.cuisine_style),
        ingredients: located
            .block(INGREDIENTS_NEEDED)
            .map(|block| itemized_list(block, Bullet::Hyphen))
            .unwrap_or(fallback.ingredients),
        instructions: located
            .block(INSTRUCTIONS)
            .map(|block| itemized_list(block, Bullet::Numbered))
            .unwrap_or(fallback.instructions),
        difficulty: located.scalar(DIFFICULTY).unwrap_or(fallback.difficulty),
        servings: located.scalar(SERVINGS).unwrap_or(fallback.servings),
        flavor_profile: located
            .scalar(FLAVOR_PROFILE)
            .unwrap_or(fallback.flavor_profile),
    }
}
