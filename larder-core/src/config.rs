//! Configuration from environment variables.
//!
//! Nothing here is global: callers build an [`LlmConfig`] / [`FeedbackConfig`]
//! once and hand it to the provider and feedback store constructors.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default cap on generated tokens per call.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Default location of the feedback log.
pub const DEFAULT_FEEDBACK_PATH: &str = "data/feedback_logs.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Which text-generation backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Fake,
}

impl ProviderKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "fake" => Ok(ProviderKind::Fake),
            _ => Err(ConfigError::InvalidValue {
                name: "LARDER_PROVIDER".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Text-generation client configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    /// API key; empty for the fake provider.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// When set, replies are cached on disk under this directory.
    pub cache_dir: Option<PathBuf>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            cache_dir: None,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// Required (gemini only):
    /// - `GEMINI_API_KEY`
    ///
    /// Optional:
    /// - `LARDER_PROVIDER`: "gemini" | "fake" (default: "gemini")
    /// - `LARDER_MODEL` (default: "gemini-2.0-flash")
    /// - `LARDER_BASE_URL`
    /// - `LARDER_TEMPERATURE` (default: 0.7)
    /// - `LARDER_MAX_OUTPUT_TOKENS` (default: 1024)
    /// - `LARDER_CACHE_DIR`: enables the on-disk reply cache
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var("LARDER_PROVIDER") {
            Ok(v) => ProviderKind::parse(&v)?,
            Err(_) => ProviderKind::Gemini,
        };

        let api_key = match provider {
            ProviderKind::Gemini => env::var("GEMINI_API_KEY")
                .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?,
            ProviderKind::Fake => String::new(),
        };

        let model = env::var("LARDER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("LARDER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let temperature = parse_var("LARDER_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        let max_output_tokens = parse_var("LARDER_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)?;

        let cache_dir = env::var("LARDER_CACHE_DIR").ok().map(PathBuf::from);

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            temperature,
            max_output_tokens,
            cache_dir,
        })
    }
}

/// Feedback log configuration.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    pub path: PathBuf,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FEEDBACK_PATH),
        }
    }
}

impl FeedbackConfig {
    /// `LARDER_FEEDBACK_PATH` (default: "data/feedback_logs.csv")
    pub fn from_env() -> Self {
        let path = env::var("LARDER_FEEDBACK_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FEEDBACK_PATH));
        Self { path }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
