// Error handling for the time-series engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeriesError>;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Cannot aggregate an empty sample set")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Failure reported by a sample source. Recovered locally by the poller.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Payload(String),
}
