use chrono::NaiveDate;

use crate::error::CagrWatchError;

pub const MAX_SYMBOL_LENGTH: usize = 20;

/// Validate a date string (YYYY-MM-DD).
pub fn validate_date(input: &str) -> Result<NaiveDate, CagrWatchError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        CagrWatchError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2020-01-01)",
            trimmed
        ))
    })
}

/// Validate that `start` is not after `end`.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), CagrWatchError> {
    if start > end {
        return Err(CagrWatchError::InvalidInput(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(())
}

/// Validate a ticker symbol: trimmed, uppercased, 1..=20 chars of
/// `A-Z`, `0-9`, `.` and `-`.
pub fn validate_symbol(input: &str) -> Result<String, CagrWatchError> {
    let symbol = input.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(CagrWatchError::InvalidInput(
            "symbol must not be empty".to_string(),
        ));
    }
    if symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(CagrWatchError::InvalidInput(format!(
            "symbol exceeds maximum length of {} characters",
            MAX_SYMBOL_LENGTH
        )));
    }
    if let Some(c) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
    {
        return Err(CagrWatchError::InvalidInput(format!(
            "symbol '{}' contains invalid character '{}'",
            symbol, c
        )));
    }
    Ok(symbol)
}
