//! Station catalog and the loaders that fill it.
//!
//! Station records come from the Riyadh open-data feed (or a local copy of
//! it) and line geometry from a GeoJSON file. Both are decoded permissively
//! at this boundary so the rest of the crate only sees well-formed values.

mod cache;
mod client;
mod dto;
mod error;
mod index;
mod lines;
mod loader;

pub use cache::{PayloadCache, PayloadCacheConfig};
pub use client::{DEFAULT_STATIONS_URL, DataSource, FeedClient, FeedClientConfig};
pub use dto::{DEFAULT_NAME, DEFAULT_NAME_SECONDARY, RawStation, RecordError, decode_stations};
pub use error::CatalogError;
pub use index::{StationCatalog, StationQuery};
pub use lines::decode_lines;
pub use loader::{CatalogData, CatalogLoader};
