//! Conversion from raw provider series to date-keyed closing prices.

use std::collections::BTreeMap;

use alphavantage_api::types::TimeSeries;
use chrono::NaiveDate;

/// Closing prices keyed by calendar date, ascending.
///
/// A `None` price marks a date that exists in the source series but whose
/// close field was absent or unparseable.
pub type PriceSeries = BTreeMap<NaiveDate, Option<f64>>;

/// Extracts the `field` closing price of every observation in `series`.
///
/// Keys that are not `YYYY-MM-DD` dates are skipped.
pub fn extract_closes(series: &TimeSeries, field: &str) -> PriceSeries {
    let mut prices = PriceSeries::new();
    let mut skipped = 0usize;

    for (key, observation) in series {
        let date = match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                tracing::warn!("Skipping observation with invalid date key '{}'", key);
                skipped += 1;
                continue;
            }
        };
        let price = observation
            .get(field)
            .and_then(|value| value.trim().parse::<f64>().ok());
        prices.insert(date, price);
    }

    if skipped > 0 {
        tracing::debug!(skipped, kept = prices.len(), "extracted closing prices");
    }
    prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphavantage_api::types::Observation;

    fn observation(pairs: &[(&str, &str)]) -> Observation {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn extracts_named_field() {
        let mut series = TimeSeries::new();
        series.insert(
            "2024-01-02".to_string(),
            observation(&[("1. open", "160.0"), ("4. close", "161.5000")]),
        );
        let prices = extract_closes(&series, "4. close");
        assert_eq!(prices.get(&d("2024-01-02")), Some(&Some(161.5)));
    }

    #[test]
    fn missing_field_keeps_date_without_price() {
        let mut series = TimeSeries::new();
        series.insert(
            "2024-01-02".to_string(),
            observation(&[("4a. close (USD)", "42000.0")]),
        );
        let prices = extract_closes(&series, "4. close");
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get(&d("2024-01-02")), Some(&None));
    }

    #[test]
    fn non_numeric_value_has_no_price() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02".to_string(), observation(&[("4. close", "n/a")]));
        let prices = extract_closes(&series, "4. close");
        assert_eq!(prices.get(&d("2024-01-02")), Some(&None));
    }

    #[test]
    fn invalid_date_keys_skipped() {
        let mut series = TimeSeries::new();
        series.insert("yesterday".to_string(), observation(&[("4. close", "1")]));
        series.insert("2024-02-30".to_string(), observation(&[("4. close", "1")]));
        series.insert("2024-02-29".to_string(), observation(&[("4. close", "1")]));
        let prices = extract_closes(&series, "4. close");
        assert_eq!(prices.len(), 1);
        assert!(prices.contains_key(&d("2024-02-29")));
    }

    #[test]
    fn ordered_by_calendar_date() {
        let mut series = TimeSeries::new();
        for key in ["2021-01-04", "2019-12-31", "2020-06-30"] {
            series.insert(key.to_string(), observation(&[("4. close", "1")]));
        }
        let dates: Vec<NaiveDate> = extract_closes(&series, "4. close").into_keys().collect();
        assert_eq!(dates, vec![d("2019-12-31"), d("2020-06-30"), d("2021-01-04")]);
    }
}
