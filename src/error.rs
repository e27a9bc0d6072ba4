//! Library error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A country code listed in more than one region set
    #[error("country code {code} appears in both region sets '{first}' and '{second}'")]
    OverlappingRegion {
        code: String,
        first: String,
        second: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("all boundary sources failed (primary: {primary}; fallback: {fallback})")]
    SourcesExhausted { primary: String, fallback: String },
}
