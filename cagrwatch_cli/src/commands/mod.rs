//! CLI subcommand implementations.

pub mod report;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use cagrwatch_lib::alphavantage_api::Client;
use cagrwatch_lib::{
    load_symbol_table, load_symbol_table_from, validation, CagrTracker, Settings, SymbolTable,
};
use chrono::NaiveDate;
use clap::Args;

/// Date range and symbol selection shared by `report` and `watch`.
#[derive(Args, Clone)]
pub struct RangeArgs {
    /// Start date (YYYY-MM-DD); the latest trading day on or before it is used
    #[arg(long)]
    pub start: String,

    /// End date (YYYY-MM-DD), defaults to today (UTC)
    #[arg(long)]
    pub end: Option<String>,

    /// Additional symbol to compute after the defaults (repeatable)
    #[arg(long = "symbol")]
    pub symbols: Vec<String>,

    /// YAML symbol table replacing the built-in one
    #[arg(long)]
    pub symbols_file: Option<PathBuf>,

    /// Skip the symbol table's default symbols
    #[arg(long)]
    pub no_defaults: bool,
}

/// A validated date range and the ordered symbols to compute over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub symbols: Vec<String>,
}

impl RangeArgs {
    /// Validates the arguments against `table`, using `today` when no end
    /// date was given. Default symbols come first, custom ones after them;
    /// a custom symbol already in the defaults is not repeated.
    pub fn plan(&self, table: &SymbolTable, today: NaiveDate) -> Result<Plan> {
        let start = validation::validate_date(&self.start)?;
        let end = match self.end {
            Some(ref val) => validation::validate_date(val)?,
            None => today,
        };
        validation::validate_range(start, end)?;

        let mut symbols = if self.no_defaults {
            Vec::new()
        } else {
            table.default_symbols()
        };
        for raw in &self.symbols {
            let symbol = validation::validate_symbol(raw)?;
            if !symbols.iter().any(|s| s.eq_ignore_ascii_case(&symbol)) {
                symbols.push(symbol);
            }
        }

        if symbols.is_empty() {
            anyhow::bail!("no symbols to compute: pass --symbol or drop --no-defaults");
        }

        Ok(Plan {
            start,
            end,
            symbols,
        })
    }

    fn symbol_table(&self) -> Result<SymbolTable> {
        let table = match self.symbols_file {
            Some(ref path) => load_symbol_table_from(path)?,
            None => load_symbol_table()?,
        };
        Ok(table)
    }
}

/// Builds a tracker from environment settings and the selected symbol table.
pub fn build_tracker(args: &RangeArgs) -> Result<CagrTracker<Client>> {
    let settings = Settings::from_env();
    let table = args.symbol_table()?;
    let client = settings.client()?;
    tracing::debug!(
        concurrency = settings.concurrency,
        symbols = table.len(),
        "tracker configured"
    );
    Ok(CagrTracker::new(client, table).with_concurrency(settings.concurrency))
}

/// Today's calendar date in UTC.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
