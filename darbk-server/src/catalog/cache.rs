//! Disk cache for the downloaded station feed.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached payload with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedPayload {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// Where the payload was fetched from.
    source: String,
    /// The raw payload body.
    body: String,
}

/// Configuration for the payload disk cache.
#[derive(Debug, Clone)]
pub struct PayloadCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains valid.
    pub ttl: Duration,
}

impl PayloadCacheConfig {
    /// Create a new cache config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Disk cache holding the last successfully decoded feed body.
///
/// The cached body is keyed by its source: a cache written for one URL is
/// ignored when the configured source changes.
#[derive(Debug, Clone)]
pub struct PayloadCache {
    config: PayloadCacheConfig,
}

impl PayloadCache {
    /// Create a new payload cache with the given config.
    pub fn new(config: PayloadCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load the body cached for `source`.
    ///
    /// Returns `None` if the cache doesn't exist, is invalid, was written for
    /// another source, or has expired.
    pub fn load(&self, source: &str) -> Option<String> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedPayload = serde_json::from_str(&contents).ok()?;

        if cached.source != source {
            return None;
        }

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        let age_secs = now.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.body)
    }

    /// Save a payload body to the cache.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, source: &str, body: &str) -> Result<(), CatalogError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| CatalogError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let cached = CachedPayload {
            cached_at_secs: now,
            source: source.to_string(),
            body: body.to_string(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| CatalogError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| CatalogError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SOURCE: &str = "https://example.com/stations";

    #[test]
    fn save_and_load_cache() {
        let dir = tempdir().unwrap();
        let cache = PayloadCache::new(PayloadCacheConfig::new(dir.path().join("feed.json")));

        cache.save(SOURCE, "{\"results\": []}").unwrap();

        assert_eq!(cache.load(SOURCE).as_deref(), Some("{\"results\": []}"));
    }

    #[test]
    fn other_source_returns_none() {
        let dir = tempdir().unwrap();
        let cache = PayloadCache::new(PayloadCacheConfig::new(dir.path().join("feed.json")));

        cache.save(SOURCE, "{}").unwrap();

        assert!(cache.load("https://example.com/other").is_none());
    }

    #[test]
    fn expired_cache_returns_none() {
        let dir = tempdir().unwrap();
        let config =
            PayloadCacheConfig::new(dir.path().join("feed.json")).with_ttl(Duration::from_secs(0));
        let cache = PayloadCache::new(config);

        cache.save(SOURCE, "{}").unwrap();

        // With 0 TTL, cache should immediately be expired
        assert!(cache.load(SOURCE).is_none());
    }

    #[test]
    fn missing_cache_returns_none() {
        let cache = PayloadCache::new(PayloadCacheConfig::new("/nonexistent/path/feed.json"));
        assert!(cache.load(SOURCE).is_none());
    }

    #[test]
    fn corrupt_cache_returns_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, "not json").unwrap();

        let cache = PayloadCache::new(PayloadCacheConfig::new(&path));
        assert!(cache.load(SOURCE).is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("feed.json");
        let cache = PayloadCache::new(PayloadCacheConfig::new(&path));

        cache.save(SOURCE, "{}").unwrap();
        assert!(path.exists());
        assert_eq!(cache.path(), path.as_path());
    }
}
