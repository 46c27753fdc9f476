//! Library layer for cagrwatch: growth-rate computation over daily price
//! series, the symbol configuration table, and concurrent per-symbol tracking.
//!
//! Wraps the `alphavantage_api` crate, which only knows how to fetch raw
//! payloads, with the date resolution and CAGR arithmetic that turn a payload
//! into a result row.

pub mod error;
pub mod growth;
pub mod series;
pub mod settings;
pub mod symbols;
pub mod tracker;
pub mod validation;

pub use alphavantage_api;

pub use error::CagrWatchError;
pub use growth::{calculate, compute_cagr, format_rate, resolve_date, CagrResult, GrowthError};
pub use series::{extract_closes, PriceSeries};
pub use settings::Settings;
pub use symbols::{
    load_symbol_table, load_symbol_table_from, SourceShape, SymbolSource, SymbolTable,
    SymbolTableError,
};
pub use tracker::{CagrTracker, SeriesSource, SymbolOutcome, SymbolReport, TrackerError};
