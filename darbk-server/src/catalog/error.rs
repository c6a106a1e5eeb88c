//! Catalog loading error types.

/// Errors that can occur while loading station or line data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Payload was not the expected JSON shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Payload was not valid GeoJSON
    #[error("GeoJSON parse error: {message}")]
    GeoJson { message: String },

    /// Reading a local source failed
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
