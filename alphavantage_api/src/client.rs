//! HTTP client for the Alpha Vantage query API.

use std::time::Duration;

use url::Url;

use crate::{
    query::{Query, SeriesQuery},
    types::SeriesPayload,
    Error,
};

/// Request timeout for Alpha Vantage calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Alpha Vantage query API.
///
/// Every function is served from the single `/query` path; the `function`
/// query parameter selects the payload shape and `apikey` authenticates.
pub struct Client {
    client: reqwest::Client,
    api_key: String,
    /// Base URL for the API. Defaults to `https://www.alphavantage.co`.
    base_api_url: String,
}

impl Client {
    /// Creates a new client pointing at the production Alpha Vantage API.
    pub fn new(api_key: String) -> Result<Self, Error> {
        Self::with_base_url("https://www.alphavantage.co", api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_url(&self, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}/query", &self.base_api_url).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidRequest(format!("invalid base URL '{}'", self.base_api_url))
        })?;
        let mut url = query.add_to_url(&url);
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        Ok(url)
    }

    /// Fetches the raw payload for a daily series query.
    ///
    /// Provider-side failures arrive as HTTP 200 with a diagnostic key in
    /// place of the series, so the body is inspected before it is returned:
    /// `Error Message` maps to [`Error::InvalidRequest`], and `Note` or
    /// `Information` without any series maps to [`Error::RateLimited`].
    pub async fn get_series(&self, query: &SeriesQuery) -> Result<SeriesPayload, Error> {
        let url = self.get_url(query)?;
        tracing::debug!(function = %query.function, symbol = %query.symbol, "fetching series");

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::Network(e)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let payload = serde_json::from_str::<SeriesPayload>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(format!("{} | body: {}", e, snippet))
        })?;

        if let Some(msg) = payload.error_message() {
            tracing::error!(symbol = %query.symbol, "Provider rejected request: {}", msg);
            return Err(Error::InvalidRequest(msg.to_string()));
        }

        let has_series = payload.keys().iter().any(|k| k.starts_with("Time Series"));
        if !has_series {
            if let Some(msg) = payload.note().or_else(|| payload.information()) {
                tracing::error!(symbol = %query.symbol, "Provider throttled request: {}", msg);
                return Err(Error::RateLimited(msg.to_string()));
            }
        }

        Ok(payload)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_with_defaults() {
        let client = Client::new("demo".to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn url_carries_query_and_api_key() {
        let client = Client::with_base_url("http://localhost:1234/", "demo".to_string()).unwrap();
        let url = client.get_url(&SeriesQuery::daily("IBM")).unwrap();
        assert_eq!(url.path(), "/query");
        assert_eq!(
            url.query(),
            Some("function=TIME_SERIES_DAILY&symbol=IBM&outputsize=full&apikey=demo")
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let client = Client::with_base_url("not a url", "demo".to_string()).unwrap();
        let err = client.get_url(&SeriesQuery::daily("IBM")).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn truncate_short_body_untouched() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_long_body() {
        let body = "x".repeat(2500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }

    #[test]
    fn error_display() {
        let err = Error::RateLimited("slow down".to_string());
        assert!(err.to_string().contains("Rate limited"));
        assert!(err.to_string().contains("slow down"));

        let err = Error::HttpStatus {
            status: 503,
            body: String::new(),
        };
        assert!(err.to_string().contains("503"));

        let err = Error::ParseFailed("bad json".to_string());
        assert!(err.to_string().contains("parse"));
    }
}
