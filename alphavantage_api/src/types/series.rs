use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

/// Top-level key of the equity series (`TIME_SERIES_DAILY`).
pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
/// Closing-price field inside an equity observation.
pub const DAILY_CLOSE_FIELD: &str = "4. close";
/// Top-level key of the crypto-asset series (`DIGITAL_CURRENCY_DAILY`).
pub const DIGITAL_SERIES_KEY: &str = "Time Series (Digital Currency Daily)";
/// Closing-price field inside a crypto-asset observation.
pub const DIGITAL_CLOSE_FIELD: &str = "4a. close (USD)";

/// One day's record: field name to numeric-as-string value.
pub type Observation = BTreeMap<String, String>;

/// Date string (`YYYY-MM-DD`) to that day's record.
pub type TimeSeries = BTreeMap<String, Observation>;

/// A raw provider response.
///
/// The provider answers every function with a flat JSON object whose keys
/// depend on the function (`Meta Data`, `Time Series (Daily)`, ...) and, on
/// failure, with diagnostic keys instead of the series. Both cases arrive
/// with HTTP 200, so the payload is kept untyped until a caller asks for a
/// specific series.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SeriesPayload {
    fields: Map<String, Value>,
}

impl SeriesPayload {
    /// Returns the series stored under `key`, or `None` when the key is absent.
    pub fn series(&self, key: &str) -> Result<Option<TimeSeries>, Error> {
        match self.fields.get(key) {
            Some(value) => serde_json::from_value::<TimeSeries>(value.clone())
                .map(Some)
                .map_err(|e| Error::ParseFailed(format!("malformed '{}': {}", key, e))),
            None => Ok(None),
        }
    }

    /// The `Meta Data` block, if the provider sent one.
    pub fn meta_data(&self) -> Option<BTreeMap<String, String>> {
        self.fields
            .get("Meta Data")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Provider rejection, e.g. an unknown symbol or a bad API key.
    pub fn error_message(&self) -> Option<&str> {
        self.text_field("Error Message")
    }

    /// Throttling notice from the provider.
    pub fn note(&self) -> Option<&str> {
        self.text_field("Note")
    }

    /// Informational notice; the provider also uses this for quota exhaustion.
    pub fn information(&self) -> Option<&str> {
        self.text_field("Information")
    }

    /// Names of the top-level keys, for diagnostics.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn text_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}
