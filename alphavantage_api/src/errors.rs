//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built or sent (bad URL, timeout, connection reset).
    #[error("Network error")]
    Network(#[from] reqwest::Error),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the JSON document we expected.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The provider rejected the request (unknown symbol, bad function, bad key).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The provider throttled the request. Reported in-band with HTTP 200.
    #[error("Rate limited by Alpha Vantage: {0}")]
    RateLimited(String),
}
