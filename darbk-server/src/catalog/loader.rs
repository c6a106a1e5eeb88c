//! Loads stations and line geometry from their configured sources.

use tracing::{debug, info, warn};

use crate::domain::{LineGeometry, StationRecord};

use super::cache::PayloadCache;
use super::client::{DataSource, FeedClient};
use super::dto::decode_stations;
use super::error::CatalogError;
use super::lines::decode_lines;

/// Station records and line geometries from one load.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub stations: Vec<StationRecord>,
    pub lines: Vec<LineGeometry>,
}

/// Fetches and decodes the network data.
///
/// The station feed is required: if it cannot be fetched or decoded the load
/// fails. Line geometry is optional: a failure is logged and the load
/// continues without lines, so projection falls back to station coordinates.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    client: FeedClient,
    stations: DataSource,
    lines: DataSource,
    cache: Option<PayloadCache>,
}

impl CatalogLoader {
    /// Create a loader for the given sources.
    pub fn new(client: FeedClient, stations: DataSource, lines: DataSource) -> Self {
        Self {
            client,
            stations,
            lines,
            cache: None,
        }
    }

    /// Cache the station feed on disk.
    pub fn with_cache(mut self, cache: PayloadCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Load stations and lines concurrently.
    pub async fn load(&self) -> Result<CatalogData, CatalogError> {
        let (stations, lines) = futures::join!(self.load_stations(), self.load_lines());
        let stations = stations?;

        info!(
            stations = stations.len(),
            lines = lines.len(),
            "Loaded network data"
        );

        Ok(CatalogData { stations, lines })
    }

    async fn load_stations(&self) -> Result<Vec<StationRecord>, CatalogError> {
        let source = self.stations.to_string();

        if let Some(cache) = &self.cache
            && let Some(body) = cache.load(&source)
        {
            match decode_stations(&body) {
                Ok(stations) => {
                    debug!(path = %cache.path().display(), "Using cached station feed");
                    return Ok(stations);
                }
                Err(e) => warn!(error = %e, "Ignoring unreadable station cache"),
            }
        }

        let body = self.client.fetch(&self.stations).await?;
        let stations = decode_stations(&body)?;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(&source, &body)
        {
            warn!(error = %e, "Failed to write station cache");
        }

        Ok(stations)
    }

    async fn load_lines(&self) -> Vec<LineGeometry> {
        let result = match self.client.fetch(&self.lines).await {
            Ok(body) => decode_lines(&body),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            warn!(source = %self.lines, error = %e, "Line geometry unavailable");
            Vec::new()
        })
    }
}
