use thiserror::Error;

/// Errors that can occur within a `TickerDataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, undecodable body).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API returned an error status or an error object.
    #[error("API error: {0}")]
    Api(String),

    /// The response decoded but could not be turned into our models.
    #[error("Internal provider error: {0}")]
    Internal(String),
}
