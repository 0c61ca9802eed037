//! Relay error types

use thiserror::Error;

/// Fatal conditions that stop a relay run.
///
/// Per-variable JSON decode failures are not errors; they surface as
/// [`crate::hooks::DecodeWarning`] and the run continues.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The payload could not be encoded as JSON
    #[error("unable to marshal data to JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The HTTP client could not be constructed (e.g. TLS backend failure)
    #[error("unable to initialize HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response
    #[error("unable to POST to URL '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status
    #[error("unsuccessful response code for POST to URL '{url}', received '{status}'")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
