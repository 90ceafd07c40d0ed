use std::path::PathBuf;

use thiserror::Error;

use crate::providers::ProviderError;

/// The unified error type for the `ticker_data` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No cache file exists for the ticker and no refresh was requested.
    #[error("No cached data for {ticker} at {}; run a refresh first", path.display())]
    CacheMiss { ticker: String, path: PathBuf },

    /// A key expected in the snapshot's `info` map is absent.
    #[error("Missing field in ticker info: {0}")]
    MissingField(String),

    /// An error originating from a data provider (e.g., transport failure, bad payload).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The ticker symbol is empty or contains characters not allowed in a symbol.
    #[error("Invalid ticker symbol: {0:?}")]
    InvalidTicker(String),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache document could not be encoded or decoded.
    #[error("Invalid cache document: {0}")]
    Json(#[from] serde_json::Error),
}
