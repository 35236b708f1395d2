//! `feedback` and `stats` commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use larder_core::{CsvFeedbackStore, FeedbackConfig, FeedbackLogger};
use serde::Deserialize;
use serde_json::json;

/// The fields of a saved `generate` response that feedback needs.
#[derive(Debug, Deserialize)]
struct SavedRecipe {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    recipe_title: String,
    #[serde(default)]
    filtered_ingredients: Vec<String>,
    #[serde(default)]
    valid_preferences: Vec<String>,
    #[serde(default)]
    estimated_cook_time: Option<u32>,
}

/// Logger over the CSV log at `path`, or the configured default.
pub fn feedback_logger(path: Option<PathBuf>) -> FeedbackLogger {
    let config = match path {
        Some(path) => FeedbackConfig { path },
        None => FeedbackConfig::from_env(),
    };
    FeedbackLogger::new(Arc::new(CsvFeedbackStore::from_config(&config)))
}

fn load_saved_recipe(path: &Path) -> Result<SavedRecipe> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let saved: SavedRecipe = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if saved.status.as_deref() == Some("error") {
        bail!("{} is a failed generation, nothing to rate", path.display());
    }
    Ok(saved)
}

pub fn submit(recipe: &Path, feedback_type: &str, feedback_path: Option<PathBuf>) -> Result<()> {
    let saved = load_saved_recipe(recipe)?;
    let logger = feedback_logger(feedback_path);

    let record = logger.log(
        feedback_type,
        &saved.recipe_title,
        &saved.filtered_ingredients,
        &saved.valid_preferences,
        saved.estimated_cook_time,
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "feedback_logged": record.is_some(),
            "feedback_record": record,
        }))?
    );

    if record.is_none() {
        bail!("Feedback was not logged");
    }
    Ok(())
}

pub fn stats(feedback_path: Option<PathBuf>) -> Result<()> {
    let stats = feedback_logger(feedback_path)
        .stats()
        .context("Failed to read feedback log")?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
