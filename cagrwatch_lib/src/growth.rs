//! Compound annual growth rate between two dated price observations.
//!
//! Two pure functions make up the core: [`resolve_date`] maps a requested
//! date onto the latest available observation not after it, and
//! [`compute_cagr`] annualizes the price change between two observations.
//! [`calculate`] composes them over a [`PriceSeries`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::series::PriceSeries;

/// Calendar days per year used to annualize elapsed time.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Errors from growth-rate computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrowthError {
    #[error("Time series is empty")]
    EmptySeries,
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

/// The outcome of one growth-rate calculation.
///
/// `rate` is a percentage (e.g. `100.0` for a doubling over one year) and is
/// left unrounded; use [`format_rate`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CagrResult {
    pub resolved_start_date: NaiveDate,
    pub resolved_end_date: NaiveDate,
    pub rate: f64,
}

/// Finds the latest date in `series` that is on or before `target`.
///
/// When `target` precedes every date in the series, the earliest date is
/// returned instead. An empty series is an error.
pub fn resolve_date<V>(
    series: &BTreeMap<NaiveDate, V>,
    target: NaiveDate,
) -> Result<NaiveDate, GrowthError> {
    let earliest = series
        .keys()
        .next()
        .copied()
        .ok_or(GrowthError::EmptySeries)?;

    match series.range(..=target).next_back() {
        Some((date, _)) => Ok(*date),
        None => {
            tracing::debug!(
                %target,
                %earliest,
                "target precedes all observations, using earliest date"
            );
            Ok(earliest)
        }
    }
}

/// Computes the compound annual growth rate, in percent, between two prices.
///
/// Returns [`GrowthError::InsufficientData`] when either price is missing,
/// non-finite or not strictly positive, when `end_date` is not after
/// `start_date`, or when the result would not be a finite number.
pub fn compute_cagr(
    start_price: Option<f64>,
    start_date: NaiveDate,
    end_price: Option<f64>,
    end_date: NaiveDate,
) -> Result<f64, GrowthError> {
    let start_price = checked_price(start_price, "start", start_date)?;
    let end_price = checked_price(end_price, "end", end_date)?;

    let days = (end_date - start_date).num_days();
    if days <= 0 {
        return Err(GrowthError::InsufficientData(format!(
            "end date {} is not after start date {}",
            end_date, start_date
        )));
    }
    let years = days as f64 / DAYS_PER_YEAR;

    let rate = ((end_price / start_price).powf(1.0 / years) - 1.0) * 100.0;
    if !rate.is_finite() {
        return Err(GrowthError::InsufficientData(format!(
            "growth rate between {} and {} is not a finite number",
            start_date, end_date
        )));
    }
    Ok(rate)
}

fn checked_price(price: Option<f64>, label: &str, date: NaiveDate) -> Result<f64, GrowthError> {
    match price {
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        Some(p) => Err(GrowthError::InsufficientData(format!(
            "{} price {} on {} is not a positive number",
            label, p, date
        ))),
        None => Err(GrowthError::InsufficientData(format!(
            "no {} price on {}",
            label, date
        ))),
    }
}

/// Resolves both endpoints against `series` and computes the growth rate
/// between the resolved observations.
pub fn calculate(
    series: &PriceSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<CagrResult, GrowthError> {
    let resolved_start_date = resolve_date(series, start)?;
    let resolved_end_date = resolve_date(series, end)?;

    let start_price = series.get(&resolved_start_date).copied().flatten();
    let end_price = series.get(&resolved_end_date).copied().flatten();

    let rate = compute_cagr(start_price, resolved_start_date, end_price, resolved_end_date)?;

    Ok(CagrResult {
        resolved_start_date,
        resolved_end_date,
        rate,
    })
}

/// Rounds a rate to two decimal places.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}

/// Formats a rate for display, e.g. `12.35%`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}
