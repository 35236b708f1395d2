mod display;
mod feedback;
mod generate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Turn the ingredients you have into a recipe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a recipe from an ingredient list and/or a photo
    Generate {
        /// Ingredients, as free text (e.g. "2 tomatoes, onion, rice")
        #[arg(long, short)]
        ingredients: Option<String>,
        /// Photo of ingredients to read the list from
        #[arg(long)]
        image: Option<PathBuf>,
        /// Dietary preference; repeat or comma-separate for several
        #[arg(long = "preference", short = 'p', value_delimiter = ',')]
        preferences: Vec<String>,
        /// Minutes available
        #[arg(long, default_value_t = larder_core::pipeline::DEFAULT_MAX_TIME)]
        max_time: u32,
        /// Also generate an alternate recipe
        #[arg(long)]
        alternate: bool,
        /// Log feedback for the generated recipe (thumbs_up or thumbs_down)
        #[arg(long)]
        feedback: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Also save the JSON response to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Feedback log (default: LARDER_FEEDBACK_PATH or data/feedback_logs.csv)
        #[arg(long)]
        feedback_path: Option<PathBuf>,
    },
    /// Read ingredient names off a photo
    Ocr {
        /// Image file (JPEG, PNG, GIF or WebP)
        image: PathBuf,
    },
    /// Log thumbs up/down for a recipe saved with `generate --output`
    Feedback {
        /// Saved recipe JSON
        #[arg(long)]
        recipe: PathBuf,
        /// thumbs_up or thumbs_down
        #[arg(long = "type")]
        feedback_type: String,
        #[arg(long)]
        feedback_path: Option<PathBuf>,
    },
    /// Show feedback statistics
    Stats {
        #[arg(long)]
        feedback_path: Option<PathBuf>,
    },
    /// List the pipeline stages and the route a run takes
    Stages,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // stdout is reserved for command output
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            ingredients,
            image,
            preferences,
            max_time,
            alternate,
            feedback,
            format,
            output,
            feedback_path,
        } => {
            generate::generate(generate::GenerateArgs {
                ingredients,
                image,
                preferences,
                max_time,
                alternate,
                feedback,
                format,
                output,
                feedback_path,
            })
            .await?;
        }
        Commands::Ocr { image } => {
            generate::ocr(&image).await?;
        }
        Commands::Feedback {
            recipe,
            feedback_type,
            feedback_path,
        } => {
            feedback::submit(&recipe, &feedback_type, feedback_path)?;
        }
        Commands::Stats { feedback_path } => {
            feedback::stats(feedback_path)?;
        }
        Commands::Stages => {
            generate::stages();
        }
    }

    Ok(())
}
