//! Error types for the library layer.

use std::fmt;

use crate::symbols::SymbolTableError;
use crate::tracker::TrackerError;

/// Errors produced by the library layer, wrapping provider, tracking and
/// configuration failures and adding input validation failures.
#[derive(Debug)]
pub enum CagrWatchError {
    /// An error from the underlying API client.
    Api(alphavantage_api::Error),
    /// Fetching or computing a symbol's growth rate failed.
    Tracker(TrackerError),
    /// The symbol table or environment configuration is invalid.
    Config(SymbolTableError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for CagrWatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Tracker(e) => write!(f, "Tracking error: {}", e),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CagrWatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Tracker(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<alphavantage_api::Error> for CagrWatchError {
    fn from(e: alphavantage_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<TrackerError> for CagrWatchError {
    fn from(e: TrackerError) -> Self {
        Self::Tracker(e)
    }
}

impl From<SymbolTableError> for CagrWatchError {
    fn from(e: SymbolTableError) -> Self {
        Self::Config(e)
    }
}
