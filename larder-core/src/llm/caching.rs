//! On-disk reply cache wrapped around any provider.
//!
//! Entries live at `{cache_dir}/{provider}/{model}/{hash[0:2]}/{hash}.json`
//! where `hash` is the SHA-256 of the prompt. Writes are best-effort: a cache
//! failure is logged and the live reply is still returned.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{LlmError, LlmProvider};

/// A cached reply plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedReply {
    provider: String,
    model: String,
    prompt_hash: String,
    cached_at: DateTime<Utc>,
    reply: String,
}

/// Counters for one `CachingProvider`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Reply files currently on disk for this provider/model.
    pub stored: usize,
}

/// Caching decorator for an [`LlmProvider`].
#[derive(Debug)]
pub struct CachingProvider {
    inner: Box<dyn LlmProvider>,
    cache_dir: PathBuf,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl CachingProvider {
    pub fn new(inner: Box<dyn LlmProvider>, cache_dir: PathBuf) -> Self {
        Self {
            inner,
            cache_dir,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn model_dir(&self) -> PathBuf {
        self.cache_dir
            .join(self.inner.provider_name())
            .join(self.inner.model_name().replace(['/', ':'], "--"))
    }

    fn entry_path(&self, prompt_hash: &str) -> PathBuf {
        self.model_dir()
            .join(&prompt_hash[..2])
            .join(format!("{}.json", prompt_hash))
    }

    fn lookup(&self, prompt_hash: &str) -> Option<String> {
        let content = fs::read_to_string(self.entry_path(prompt_hash)).ok()?;
        let cached: CachedReply = serde_json::from_str(&content).ok()?;
        Some(cached.reply)
    }

    fn store(&self, prompt_hash: &str, reply: &str) -> Result<(), LlmError> {
        let path = self.entry_path(prompt_hash);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LlmError::CacheError(e.to_string()))?;
        }

        let cached = CachedReply {
            provider: self.inner.provider_name().to_string(),
            model: self.inner.model_name().to_string(),
            prompt_hash: prompt_hash.to_string(),
            cached_at: Utc::now(),
            reply: reply.to_string(),
        };
        let json = serde_json::to_string_pretty(&cached)
            .map_err(|e| LlmError::CacheError(e.to_string()))?;

        fs::write(&path, json).map_err(|e| LlmError::CacheError(e.to_string()))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stored: count_entries(&self.model_dir()),
        }
    }
}

fn prompt_hash(prompt: &str) -> String {
    hex::encode(Sha256::digest(prompt.as_bytes()))
}

fn count_entries(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .map(|path| {
            if path.is_dir() {
                count_entries(&path)
            } else if path.extension().is_some_and(|ext| ext == "json") {
                1
            } else {
                0
            }
        })
        .sum()
}

#[async_trait]
impl LlmProvider for CachingProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let hash = prompt_hash(prompt);

        if let Some(reply) = self.lookup(&hash) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                provider = self.inner.provider_name(),
                model = self.inner.model_name(),
                prompt_hash = %hash,
                "LLM cache hit"
            );
            return Ok(reply);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let reply = self.inner.complete(prompt).await?;

        if let Err(e) = self.store(&hash, &reply) {
            tracing::warn!(error = %e, "Failed to cache LLM reply");
        }

        Ok(reply)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_second_call_served_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let fake = Box::new(FakeProvider::with_response("soup", "TITLE: Soup"));
        let provider = CachingProvider::new(fake, temp_dir.path().to_path_buf());

        assert_eq!(provider.complete("make soup").await.unwrap(), "TITLE: Soup");
        assert_eq!(provider.complete("make soup").await.unwrap(), "TITLE: Soup");

        let stats = provider.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stored, 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let temp_dir = TempDir::new().unwrap();
        let provider = CachingProvider::new(
            Box::new(FakeProvider::failing("offline")),
            temp_dir.path().to_path_buf(),
        );

        assert!(provider.complete("make soup").await.is_err());
        assert_eq!(provider.stats().stored, 0);
    }

    #[test]
    fn test_prompt_hash_is_stable() {
        assert_eq!(prompt_hash("abc"), prompt_hash("abc"));
        assert_ne!(prompt_hash("abc"), prompt_hash("abd"));
        assert_eq!(prompt_hash("abc").len(), 64);
    }
}
