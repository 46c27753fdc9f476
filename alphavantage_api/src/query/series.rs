//! Query builder for the daily time-series endpoints.

use std::fmt;

use serde::Deserialize;
use url::Url;

use super::Query;

/// The provider function selecting which series shape is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    /// Equity end-of-day series, keyed under `Time Series (Daily)`.
    TimeSeriesDaily,
    /// Crypto-asset daily series, keyed under `Time Series (Digital Currency Daily)`.
    DigitalCurrencyDaily,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Function::TimeSeriesDaily => "TIME_SERIES_DAILY",
            Function::DigitalCurrencyDaily => "DIGITAL_CURRENCY_DAILY",
        };
        write!(f, "{}", s)
    }
}

/// How much history the equity endpoint returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    /// Latest 100 observations. Provider default.
    #[default]
    Compact,
    /// Full 20+ year history.
    Full,
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSize::Compact => write!(f, "compact"),
            OutputSize::Full => write!(f, "full"),
        }
    }
}

/// A request for one symbol's daily series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesQuery {
    pub function: Function,
    pub symbol: String,
    pub market: Option<String>,
    pub output_size: Option<OutputSize>,
}

impl SeriesQuery {
    /// Full-history equity series for `symbol`.
    pub fn daily(symbol: &str) -> Self {
        Self {
            function: Function::TimeSeriesDaily,
            symbol: symbol.to_string(),
            market: None,
            output_size: Some(OutputSize::Full),
        }
    }

    /// Crypto-asset series for `symbol` quoted in `market` (e.g. `BTC` in `USD`).
    pub fn digital_currency(symbol: &str, market: &str) -> Self {
        Self {
            function: Function::DigitalCurrencyDaily,
            symbol: symbol.to_string(),
            market: Some(market.to_string()),
            output_size: None,
        }
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = Some(output_size);
        self
    }
}

impl Query for SeriesQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("function", &self.function.to_string())
            .append_pair("symbol", &self.symbol);
        if let Some(market) = &self.market {
            url.query_pairs_mut().append_pair("market", market);
        }
        if let Some(output_size) = self.output_size {
            url.query_pairs_mut()
                .append_pair("outputsize", &output_size.to_string());
        }
        url
    }
}
