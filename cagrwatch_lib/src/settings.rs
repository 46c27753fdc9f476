//! Environment-driven settings.

use crate::tracker::DEFAULT_CONCURRENCY;

/// API key the provider accepts for demonstration requests.
pub const DEMO_API_KEY: &str = "demo";

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `ALPHAVANTAGE_API_KEY`, defaults to `demo`.
    pub api_key: String,
    /// `ALPHAVANTAGE_BASE_URL`, unset means the production endpoint.
    pub base_url: Option<String>,
    /// `CAGRWATCH_CONCURRENCY`, defaults to 3.
    pub concurrency: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty("ALPHAVANTAGE_API_KEY").unwrap_or_else(|| DEMO_API_KEY.to_string()),
            base_url: non_empty("ALPHAVANTAGE_BASE_URL"),
            concurrency: non_empty("CAGRWATCH_CONCURRENCY")
                .and_then(|val| val.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_CONCURRENCY),
        }
    }

    /// Builds the provider client these settings describe.
    pub fn client(&self) -> Result<alphavantage_api::Client, alphavantage_api::Error> {
        match &self.base_url {
            Some(url) => alphavantage_api::Client::with_base_url(url, self.api_key.clone()),
            None => alphavantage_api::Client::new(self.api_key.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]);
        assert_eq!(s.api_key, "demo");
        assert_eq!(s.base_url, None);
        assert_eq!(s.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn overrides() {
        let s = settings(&[
            ("ALPHAVANTAGE_API_KEY", "abc123"),
            ("ALPHAVANTAGE_BASE_URL", "http://localhost:9000"),
            ("CAGRWATCH_CONCURRENCY", "8"),
        ]);
        assert_eq!(s.api_key, "abc123");
        assert_eq!(s.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(s.concurrency, 8);
        assert!(s.client().is_ok());
    }

    #[test]
    fn invalid_values_fall_back() {
        let s = settings(&[
            ("ALPHAVANTAGE_API_KEY", "  "),
            ("CAGRWATCH_CONCURRENCY", "zero"),
        ]);
        assert_eq!(s.api_key, "demo");
        assert_eq!(s.concurrency, DEFAULT_CONCURRENCY);

        let s = settings(&[("CAGRWATCH_CONCURRENCY", "0")]);
        assert_eq!(s.concurrency, DEFAULT_CONCURRENCY);
    }
}
