//! `generate`, `ocr` and `stages` commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use larder_core::llm::{create_provider, create_vision_provider};
use larder_core::pipeline::{route, RecipePipeline, RecipeRequest};
use larder_core::{is_ocr_error, FakeProvider, FeedbackLogger, GenerateResponse, ImageToText, LlmConfig};
use tracing::info;

use crate::display::render_text;
use crate::feedback::feedback_logger;
use crate::OutputFormat;

pub struct GenerateArgs {
    pub ingredients: Option<String>,
    pub image: Option<PathBuf>,
    pub preferences: Vec<String>,
    pub max_time: u32,
    pub alternate: bool,
    pub feedback: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub feedback_path: Option<PathBuf>,
}

pub async fn generate(args: GenerateArgs) -> Result<()> {
    let config = LlmConfig::from_env().context("Failed to load LLM configuration")?;

    let from_image = match &args.image {
        Some(path) => Some(read_image_text(&config, path).await?),
        None => None,
    };
    let ingredients = combine_ingredients(args.ingredients.as_deref(), from_image.as_deref())?;

    let mut request = RecipeRequest::new(ingredients)
        .with_preferences(
            args.preferences
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty()),
        )
        .with_max_time(args.max_time)
        .with_alternate(args.alternate);
    if let Some(feedback) = args.feedback {
        request = request.with_feedback(feedback);
    }

    let provider = create_provider(&config).context("Failed to create LLM provider")?;
    let pipeline = RecipePipeline::new(provider, feedback_logger(args.feedback_path));
    let response = pipeline.generate(request).await;

    let json = serde_json::to_string_pretty(&response)?;
    if let Some(path) = &args.output {
        fs::write(path, &json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved response to {}", path.display());
    }

    match (&response, args.format) {
        (GenerateResponse::Success(state), OutputFormat::Text) => print!("{}", render_text(state)),
        _ => println!("{}", json),
    }

    if let GenerateResponse::Error { error, .. } = &response {
        bail!("Recipe generation failed: {}", error);
    }
    Ok(())
}

pub async fn ocr(image: &Path) -> Result<()> {
    let config = LlmConfig::from_env().context("Failed to load LLM configuration")?;
    let text = read_image_text(&config, image).await?;
    println!("{}", text);
    Ok(())
}

/// Metadata does not depend on the provider, so no credentials are needed.
pub fn stages() {
    let pipeline = RecipePipeline::new(
        Arc::new(FakeProvider::default()),
        FeedbackLogger::new(Arc::new(larder_core::CsvFeedbackStore::new(
            larder_core::config::DEFAULT_FEEDBACK_PATH,
        ))),
    );

    for meta in pipeline.stages() {
        println!("{} - {}", meta.name, meta.description);
        println!("  reads:  {}", meta.reads.join(", "));
        println!("  writes: {}", meta.writes.join(", "));
        if let Some(prompt) = meta.prompt_name {
            println!("  prompt: {}", prompt);
        }
    }

    for generate_alternate in [false, true] {
        let stages: Vec<String> = route(generate_alternate)
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!(
            "\nroute (generate_alternate={}): {}",
            generate_alternate,
            stages.join(" -> ")
        );
    }
}

async fn read_image_text(config: &LlmConfig, path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
    let provider = create_vision_provider(config).context("Failed to create vision provider")?;

    let text = ImageToText::new(provider).extract_ingredients(&bytes).await;
    if is_ocr_error(&text) {
        bail!("{}", text);
    }
    if text.is_empty() {
        bail!("No ingredients found in {}", path.display());
    }
    Ok(text)
}

/// Typed ingredients first, then whatever was read off the photo.
fn combine_ingredients(typed: Option<&str>, from_image: Option<&str>) -> Result<String> {
    let parts: Vec<&str> = [typed, from_image]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        bail!("No ingredients given: pass --ingredients or --image");
    }
    Ok(parts.join(", "))
}
