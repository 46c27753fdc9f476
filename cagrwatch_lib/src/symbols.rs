//! Symbol configuration table.
//!
//! Maps each tracked symbol to the provider endpoint that serves it and the
//! payload keys its series uses. Crypto assets and equities come back under
//! different top-level keys with differently named close fields, so the
//! shape travels with the symbol instead of being special-cased at call
//! sites.
//!
//! The default table is embedded at compile time from
//! `seed_data/symbols.yml`; a user file can replace it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use alphavantage_api::types::{
    DAILY_CLOSE_FIELD, DAILY_SERIES_KEY, DIGITAL_CLOSE_FIELD, DIGITAL_SERIES_KEY,
};
use alphavantage_api::{OutputSize, SeriesQuery};
use serde::Deserialize;
use thiserror::Error;

/// Quote currency used for crypto assets without an explicit market.
pub const DEFAULT_MARKET: &str = "USD";

/// Error types for symbol table operations.
#[derive(Error, Debug)]
pub enum SymbolTableError {
    #[error("Failed to parse symbol table YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate symbol in symbol table: {0}")]
    DuplicateSymbol(String),
    #[error("Empty symbol in symbol table")]
    EmptySymbol,
    #[error("Failed to read symbol table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Which provider payload shape a symbol's series arrives in.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceShape {
    Equity,
    Crypto,
}

impl SourceShape {
    pub fn series_key(self) -> &'static str {
        match self {
            SourceShape::Equity => DAILY_SERIES_KEY,
            SourceShape::Crypto => DIGITAL_SERIES_KEY,
        }
    }

    pub fn close_field(self) -> &'static str {
        match self {
            SourceShape::Equity => DAILY_CLOSE_FIELD,
            SourceShape::Crypto => DIGITAL_CLOSE_FIELD,
        }
    }
}

/// How to fetch and read one symbol.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SymbolSource {
    /// Display symbol, e.g. `BTC-USD`.
    pub symbol: String,
    pub shape: SourceShape,
    /// Provider symbol when it differs from the display symbol (`BTC`).
    #[serde(default)]
    pub api_symbol: Option<String>,
    /// Quote currency for crypto assets.
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub series_key: Option<String>,
    #[serde(default)]
    pub close_field: Option<String>,
    /// Equity history depth (`compact` or `full`); full when unset.
    #[serde(default)]
    pub output_size: Option<OutputSize>,
}

impl SymbolSource {
    /// An equity fetched under its own symbol with default payload keys.
    pub fn equity(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            shape: SourceShape::Equity,
            api_symbol: None,
            market: None,
            series_key: None,
            close_field: None,
            output_size: None,
        }
    }

    pub fn api_symbol(&self) -> &str {
        self.api_symbol.as_deref().unwrap_or(&self.symbol)
    }

    pub fn series_key(&self) -> &str {
        self.series_key
            .as_deref()
            .unwrap_or_else(|| self.shape.series_key())
    }

    pub fn close_field(&self) -> &str {
        self.close_field
            .as_deref()
            .unwrap_or_else(|| self.shape.close_field())
    }

    /// The provider query for this symbol.
    pub fn query(&self) -> SeriesQuery {
        match self.shape {
            SourceShape::Equity => match self.output_size {
                Some(output_size) => {
                    SeriesQuery::daily(self.api_symbol()).with_output_size(output_size)
                }
                None => SeriesQuery::daily(self.api_symbol()),
            },
            SourceShape::Crypto => SeriesQuery::digital_currency(
                self.api_symbol(),
                self.market.as_deref().unwrap_or(DEFAULT_MARKET),
            ),
        }
    }
}

#[derive(Deserialize, Debug)]
struct SymbolTableFile {
    symbols: Vec<SymbolSource>,
}

/// Ordered set of configured symbols.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    sources: Vec<SymbolSource>,
}

impl SymbolTable {
    /// Looks up a symbol, ignoring ASCII case.
    pub fn get(&self, symbol: &str) -> Option<&SymbolSource> {
        self.sources
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Configuration for `symbol`; unknown symbols are treated as equities
    /// fetched under their own name.
    pub fn resolve_source(&self, symbol: &str) -> SymbolSource {
        match self.get(symbol) {
            Some(source) => source.clone(),
            None => SymbolSource::equity(symbol),
        }
    }

    /// Display symbols in table order.
    pub fn default_symbols(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.symbol.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Parse a symbol table from YAML content.
pub fn parse_symbol_table(yaml_content: &str) -> Result<SymbolTable, SymbolTableError> {
    let file: SymbolTableFile = serde_yml::from_str(yaml_content)?;

    let mut seen = HashSet::new();
    for source in &file.symbols {
        let key = source.symbol.trim().to_ascii_uppercase();
        if key.is_empty() {
            return Err(SymbolTableError::EmptySymbol);
        }
        if !seen.insert(key) {
            return Err(SymbolTableError::DuplicateSymbol(source.symbol.clone()));
        }
    }

    Ok(SymbolTable {
        sources: file.symbols,
    })
}

/// Load the symbol table embedded at compile time.
pub fn load_symbol_table() -> Result<SymbolTable, SymbolTableError> {
    let yaml_content = include_str!("../../seed_data/symbols.yml");
    parse_symbol_table(yaml_content)
}

/// Load a symbol table from a YAML file on disk.
pub fn load_symbol_table_from(path: &Path) -> Result<SymbolTable, SymbolTableError> {
    let yaml_content = std::fs::read_to_string(path).map_err(|source| SymbolTableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_symbol_table(&yaml_content)
}
