//! Fake LLM provider for testing.
//!
//! This provider returns deterministic replies based on prompt matching,
//! allowing pipeline tests to run without network access or API costs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::{LlmError, LlmProvider, VisionProvider};

/// A fake LLM provider for testing.
///
/// Replies are matched by checking if the prompt contains a registered
/// substring (case-insensitive, first registration wins). If nothing matches,
/// the default reply is returned, or an error when there is none.
#[derive(Debug)]
pub struct FakeProvider {
    /// (prompt substring, reply) in registration order
    responses: RwLock<Vec<(String, String)>>,
    /// Default reply if no pattern matches
    default_response: Option<String>,
    /// When set, every call fails with this message
    failure: Option<String>,
    /// Prompts seen so far, in call order
    prompts: RwLock<Vec<String>>,
    calls: AtomicUsize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            default_response: Some(String::new()),
            failure: None,
            prompts: RwLock::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses and no default.
    pub fn new() -> Self {
        Self {
            default_response: None,
            ..Self::default()
        }
    }

    /// Create a FakeProvider that returns a specific reply for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Create a FakeProvider whose every call fails.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Add a reply for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        if let Ok(mut responses) = self.responses.write() {
            responses.push((prompt_contains.to_lowercase(), response.to_string()));
        }
    }

    /// Set the default reply when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().map(|p| p.clone()).unwrap_or_default()
    }

    fn reply_for(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.write() {
            prompts.push(prompt.to_string());
        }

        if let Some(message) = &self.failure {
            return Err(LlmError::RequestFailed(message.clone()));
        }

        let prompt_lower = prompt.to_lowercase();
        if let Ok(responses) = self.responses.read() {
            if let Some((_, response)) = responses
                .iter()
                .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.reply_for(prompt)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[async_trait]
impl VisionProvider for FakeProvider {
    async fn complete_with_image(
        &self,
        prompt: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, LlmError> {
        self.reply_for(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("hello", "world");
        let result = provider.complete("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("HELLO", "world");
        let result = provider.complete("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_first_match_wins() {
        let provider = FakeProvider::new();
        provider.add_response("recipe", "first");
        provider.add_response("recipe title", "second");
        let result = provider.complete("a recipe title").await.unwrap();
        assert_eq!(result, "first");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_default_response() {
        let provider = FakeProvider::new().with_default_response("default");
        let result = provider.complete("random prompt").await.unwrap();
        assert_eq!(result, "default");
    }

    #[tokio::test]
    async fn test_fake_provider_counts_calls() {
        let provider = FakeProvider::failing("boom");
        assert!(provider.complete("one").await.is_err());
        assert!(provider.complete("two").await.is_err());
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["one", "two"]);
    }
}
