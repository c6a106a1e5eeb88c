//! Caching layer for shortest paths.
//!
//! Paths are keyed by network generation as well as endpoints, so a reload
//! never serves a path computed on an older graph. Reloads also clear the
//! cache so older generations do not hold capacity.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::StationCode;
use crate::network::Network;
use crate::route::RouteError;

/// Cache key: (network generation, from, to).
type PathKey = (u64, StationCode, StationCode);

/// Cached path entry.
type PathEntry = Arc<Vec<StationCode>>;

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache for shortest paths.
pub struct RouteCache {
    paths: MokaCache<PathKey, PathEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &RouteCacheConfig) -> Self {
        let paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { paths }
    }

    /// Shortest path on `network`, computed at most once per key.
    ///
    /// Unknown stations are rejected before the cache is consulted.
    pub async fn find_path(
        &self,
        network: &Network,
        from: &StationCode,
        to: &StationCode,
    ) -> Result<PathEntry, RouteError> {
        let key = (network.generation(), from.clone(), to.clone());

        if let Some(path) = self.paths.get(&key).await {
            debug!(%from, %to, "Route cache hit");
            return Ok(path);
        }

        let path = Arc::new(network.find_path(from, to)?);
        self.paths.insert(key, path.clone()).await;
        Ok(path)
    }

    /// Number of cached paths, after pending inserts and evictions settle.
    pub async fn path_count(&self) -> u64 {
        self.paths.run_pending_tasks().await;
        self.paths.entry_count()
    }

    /// Drop every cached path.
    pub fn clear(&self) {
        self.paths.invalidate_all();
    }
}
