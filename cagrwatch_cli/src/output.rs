use anyhow::Result;
use cagrwatch_lib::growth::round_rate;
use cagrwatch_lib::{format_rate, SymbolOutcome};
use chrono::NaiveDate;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to `Table`.
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

/// One display row. Failed symbols keep their symbol and leave the rest blank.
#[derive(Tabled, Serialize)]
struct CagrRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Start Date")]
    #[serde(rename = "Start Date")]
    start_date: String,
    #[tabled(rename = "End Date")]
    #[serde(rename = "End Date")]
    end_date: String,
    #[tabled(rename = "CAGR")]
    #[serde(rename = "CAGR")]
    cagr: String,
}

/// JSON shape of one outcome; `null` fields mark a failed symbol.
#[derive(Serialize)]
struct CagrRecord {
    symbol: String,
    resolved_start_date: Option<NaiveDate>,
    resolved_end_date: Option<NaiveDate>,
    rate: Option<f64>,
}

// -- Row builders --

fn build_cagr_rows(outcomes: &[SymbolOutcome]) -> Vec<CagrRow> {
    outcomes
        .iter()
        .map(|o| match &o.outcome {
            Ok(result) => CagrRow {
                symbol: o.symbol.clone(),
                start_date: result.resolved_start_date.to_string(),
                end_date: result.resolved_end_date.to_string(),
                cagr: format_rate(result.rate),
            },
            Err(_) => CagrRow {
                symbol: o.symbol.clone(),
                start_date: String::new(),
                end_date: String::new(),
                cagr: String::new(),
            },
        })
        .collect()
}

fn build_cagr_records(outcomes: &[SymbolOutcome]) -> Vec<CagrRecord> {
    outcomes
        .iter()
        .map(|o| {
            let result = o.outcome.as_ref().ok();
            CagrRecord {
                symbol: o.symbol.clone(),
                resolved_start_date: result.map(|r| r.resolved_start_date),
                resolved_end_date: result.map(|r| r.resolved_end_date),
                rate: result.map(|r| round_rate(r.rate)),
            }
        })
        .collect()
}

/// Render step: prints outcomes in the requested format.
pub fn render(outcomes: &[SymbolOutcome], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_cagr_table(outcomes),
        OutputFormat::Json => print_json(&build_cagr_records(outcomes)),
        OutputFormat::Csv => print_cagr_csv(outcomes)?,
        OutputFormat::Markdown => print_cagr_markdown(outcomes),
    }
    Ok(())
}

// -- Table output --

pub fn print_cagr_table(outcomes: &[SymbolOutcome]) {
    println!("{}", Table::new(build_cagr_rows(outcomes)));
}

// -- Markdown output --

pub fn print_cagr_markdown(outcomes: &[SymbolOutcome]) {
    let mut table = Table::new(build_cagr_rows(outcomes));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_cagr_csv(outcomes: &[SymbolOutcome]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_cagr_rows(outcomes) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
