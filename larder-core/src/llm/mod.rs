//! Text-generation provider abstraction.
//!
//! Stages only ever see `&dyn LlmProvider`: one prompt in, raw reply text out.
//! Caching is layered on as a decorator ([`CachingProvider`]); the providers
//! themselves never retry, cache or rate limit.

mod caching;
mod fake;
mod gemini;

pub use caching::{CacheStats, CachingProvider};
pub use fake::FakeProvider;
pub use gemini::GeminiProvider;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{LlmConfig, ProviderKind};

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

/// Trait for text-generation providers.
///
/// Implementations must be thread-safe; a single provider is shared by every
/// stage of every run.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a fully rendered prompt and get the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "gemini", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "gemini-2.0-flash").
    fn model_name(&self) -> &str;
}

/// A provider that can also read an image alongside the prompt.
#[async_trait]
pub trait VisionProvider: Send + Sync + fmt::Debug {
    async fn complete_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, LlmError>;
}

/// Build the text provider described by `config`, wrapped in the disk cache
/// when `config.cache_dir` is set.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let inner: Box<dyn LlmProvider> = match config.provider {
        ProviderKind::Fake => Box::new(FakeProvider::default()),
        ProviderKind::Gemini => {
            if config.api_key.is_empty() {
                return Err(LlmError::NotConfigured("GEMINI_API_KEY not set".to_string()));
            }
            Box::new(GeminiProvider::new(config.clone()))
        }
    };

    match &config.cache_dir {
        Some(dir) => Ok(Arc::new(CachingProvider::new(inner, dir.clone()))),
        None => Ok(Arc::from(inner)),
    }
}

/// Build the image-reading provider described by `config`.
pub fn create_vision_provider(config: &LlmConfig) -> Result<Arc<dyn VisionProvider>, LlmError> {
    match config.provider {
        ProviderKind::Fake => Ok(Arc::new(FakeProvider::default())),
        ProviderKind::Gemini => {
            if config.api_key.is_empty() {
                return Err(LlmError::NotConfigured("GEMINI_API_KEY not set".to_string()));
            }
            Ok(Arc::new(GeminiProvider::new(config.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_requires_key() {
        let config = LlmConfig::default();
        let err = create_provider(&config).unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_fake_from_config() {
        let config = LlmConfig {
            provider: ProviderKind::Fake,
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "fake");
        assert!(provider.complete("anything").await.is_ok());
    }
}
