// src/error.rs
use std::path::PathBuf;

/// Why one content source could not produce a category.
///
/// None of these ever reach a resolver caller; they decide which source is
/// tried next and what gets logged.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("remote fetching is disabled")]
    RemoteDisabled,

    #[error("no endpoint configured for {0}")]
    NotConfigured(String),

    #[error("no cached entry for {0}")]
    CacheMiss(String),

    #[error("HTTP error: {status} {location}")]
    Status { location: String, status: u16 },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed site data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("site data must be a JSON object")]
    NotAnObject,
}

impl SourceError {
    /// A source that was skipped rather than one that broke.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            SourceError::RemoteDisabled | SourceError::NotConfigured(_) | SourceError::CacheMiss(_)
        )
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
