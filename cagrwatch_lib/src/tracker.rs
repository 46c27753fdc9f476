//! Per-symbol growth tracking: fetch a series, resolve the requested dates,
//! compute the rate.
//!
//! Symbols are independent, so [`CagrTracker::track_all`] fetches them
//! concurrently behind a semaphore and reports each outcome separately.
//! A failed symbol never aborts the others.

use std::sync::Arc;

use alphavantage_api::types::TimeSeries;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::growth::{self, CagrResult, GrowthError};
use crate::series::extract_closes;
use crate::symbols::{SymbolSource, SymbolTable};

/// Default number of concurrent provider requests.
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Errors from tracking a single symbol.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Failed to fetch series: {0}")]
    Fetch(#[from] alphavantage_api::Error),
    #[error("Response for {symbol} has no '{key}' series")]
    MissingSeries { symbol: String, key: String },
    #[error(transparent)]
    Growth(#[from] GrowthError),
    #[error("Tracking task failed: {0}")]
    Task(String),
}

/// Anything that can produce the raw daily series for a configured symbol.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch(&self, source: &SymbolSource) -> Result<TimeSeries, TrackerError>;
}

#[async_trait]
impl SeriesSource for alphavantage_api::Client {
    async fn fetch(&self, source: &SymbolSource) -> Result<TimeSeries, TrackerError> {
        let payload = self.get_series(&source.query()).await?;
        payload
            .series(source.series_key())?
            .ok_or_else(|| {
                tracing::warn!(
                    symbol = %source.symbol,
                    keys = ?payload.keys(),
                    "series key missing from response"
                );
                TrackerError::MissingSeries {
                    symbol: source.symbol.clone(),
                    key: source.series_key().to_string(),
                }
            })
    }
}

/// A successful calculation for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    #[serde(flatten)]
    pub result: CagrResult,
}

/// The result of tracking one symbol, successful or not.
#[derive(Debug)]
pub struct SymbolOutcome {
    pub symbol: String,
    pub outcome: Result<CagrResult, TrackerError>,
}

/// Computes growth rates for configured or ad-hoc symbols.
pub struct CagrTracker<S> {
    source: Arc<S>,
    table: SymbolTable,
    concurrency: usize,
}

impl<S: SeriesSource + 'static> CagrTracker<S> {
    pub fn new(source: S, table: SymbolTable) -> Self {
        Self {
            source: Arc::new(source),
            table,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the maximum number of in-flight fetches. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Fetches `symbol` and computes its growth rate between `start` and `end`.
    pub async fn track(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SymbolReport, TrackerError> {
        let config = self.table.resolve_source(symbol);
        let result = track_source(self.source.as_ref(), &config, start, end).await?;
        Ok(SymbolReport {
            symbol: config.symbol,
            result,
        })
    }

    /// Tracks every symbol concurrently. Outcomes are returned in input order.
    pub async fn track_all(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<SymbolOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set = JoinSet::new();

        for (idx, symbol) in symbols.iter().enumerate() {
            let sem = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.source);
            let config = self.table.resolve_source(symbol);

            join_set.spawn(async move {
                let _permit = sem.acquire_owned().await;
                let outcome = track_source(fetcher.as_ref(), &config, start, end).await;
                (idx, outcome)
            });
        }

        let mut outcomes: Vec<Option<Result<CagrResult, TrackerError>>> =
            symbols.iter().map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
                Err(e) => tracing::error!("Tracking task panicked: {}", e),
            }
        }

        symbols
            .iter()
            .zip(outcomes)
            .map(|(symbol, outcome)| {
                let outcome = outcome
                    .unwrap_or_else(|| Err(TrackerError::Task(format!("no result for {}", symbol))));
                if let Err(ref e) = outcome {
                    tracing::warn!(%symbol, "Skipping symbol: {}", e);
                }
                SymbolOutcome {
                    symbol: symbol.clone(),
                    outcome,
                }
            })
            .collect()
    }
}

async fn track_source<S: SeriesSource + ?Sized>(
    fetcher: &S,
    config: &SymbolSource,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<CagrResult, TrackerError> {
    let raw = fetcher.fetch(config).await?;
    let prices = extract_closes(&raw, config.close_field());
    let result = growth::calculate(&prices, start, end)?;
    tracing::info!(
        symbol = %config.symbol,
        start = %result.resolved_start_date,
        end = %result.resolved_end_date,
        rate = result.rate,
        "computed CAGR"
    );
    Ok(result)
}
