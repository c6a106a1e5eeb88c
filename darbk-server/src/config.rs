//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::catalog::{
    CatalogError, CatalogLoader, DEFAULT_STATIONS_URL, DataSource, FeedClient, FeedClientConfig,
    PayloadCache, PayloadCacheConfig,
};
use crate::route::TrackerConfig;

const DEFAULT_LINES: &str = "data/metro-lines.geojson";
const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_REFRESH_SECS: u64 = 24 * 60 * 60;
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on (`DARBK_BIND`).
    pub bind: SocketAddr,

    /// Station feed (`DARBK_STATIONS`): file path or `http(s)://` URL.
    pub stations: DataSource,

    /// Line geometry (`DARBK_LINES`).
    pub lines: DataSource,

    /// HTTP timeout for remote sources (`DARBK_FEED_TIMEOUT_SECS`).
    pub feed_timeout_secs: u64,

    /// Disk cache for the station feed (`DARBK_CACHE_PATH`). Off when unset.
    pub cache_path: Option<PathBuf>,

    /// Disk cache lifetime (`DARBK_CACHE_TTL_SECS`).
    pub cache_ttl: Duration,

    /// Background reload interval (`DARBK_REFRESH_SECS`). `None` disables it.
    pub refresh_interval: Option<Duration>,

    /// Route tracking (`DARBK_ARRIVAL_RADIUS_M`).
    pub tracker: TrackerConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a lookup function.
    ///
    /// Missing keys use defaults. Unparseable values are logged and also
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let refresh_secs = parse_or(get("DARBK_REFRESH_SECS"), "DARBK_REFRESH_SECS", DEFAULT_REFRESH_SECS);

        Self {
            bind: parse_or(get("DARBK_BIND"), "DARBK_BIND", defaults.bind),
            stations: get("DARBK_STATIONS").map_or(defaults.stations, |s| DataSource::parse(&s)),
            lines: get("DARBK_LINES").map_or(defaults.lines, |s| DataSource::parse(&s)),
            feed_timeout_secs: parse_or(
                get("DARBK_FEED_TIMEOUT_SECS"),
                "DARBK_FEED_TIMEOUT_SECS",
                DEFAULT_FEED_TIMEOUT_SECS,
            ),
            cache_path: get("DARBK_CACHE_PATH").map(PathBuf::from),
            cache_ttl: Duration::from_secs(parse_or(
                get("DARBK_CACHE_TTL_SECS"),
                "DARBK_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            tracker: TrackerConfig::new(parse_radius(
                get("DARBK_ARRIVAL_RADIUS_M"),
                defaults.tracker.arrival_radius_m,
            )),
        }
    }

    /// Build the catalog loader for the configured sources.
    pub fn loader(&self) -> Result<CatalogLoader, CatalogError> {
        let client = FeedClient::new(FeedClientConfig::new().with_timeout(self.feed_timeout_secs))?;
        let loader = CatalogLoader::new(client, self.stations.clone(), self.lines.clone());

        Ok(match &self.cache_path {
            Some(path) => loader.with_cache(PayloadCache::new(
                PayloadCacheConfig::new(path).with_ttl(self.cache_ttl),
            )),
            None => loader,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            stations: DataSource::Url(DEFAULT_STATIONS_URL.to_string()),
            lines: DataSource::parse(DEFAULT_LINES),
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
            cache_path: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            refresh_interval: Some(Duration::from_secs(DEFAULT_REFRESH_SECS)),
            tracker: TrackerConfig::default(),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> T {
    let Some(value) = value else {
        return default;
    };
    match value.parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(key, value = %value, "Invalid config value, using default");
            default
        }
    }
}

/// Arrival radius in metres; must be finite and non-negative.
fn parse_radius(value: Option<String>, default: f64) -> f64 {
    let key = "DARBK_ARRIVAL_RADIUS_M";
    let radius = parse_or(value, key, default);
    if radius.is_finite() && radius >= 0.0 {
        radius
    } else {
        warn!(key, radius, "Arrival radius out of range, using default");
        default
    }
}
