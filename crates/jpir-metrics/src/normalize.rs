//! Time-series normalizer.
//!
//! Converts a raw provider price table into the canonical ascending-by-date
//! sequence of [`PricePoint`]s the classifier consumes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use jpir_core::{PricePoint, RawPriceTable};

/// Normalizes a raw price table into a canonical series.
///
/// Rows without a close are dropped. When the provider restates a date, the
/// later row wins. Missing open/high/low fall back to the row's close and a
/// missing volume becomes zero, so every canonical point is fully populated.
///
/// Empty input yields an empty series, never an error. The input table is
/// not mutated.
#[must_use]
pub fn normalize(table: &RawPriceTable) -> Vec<PricePoint> {
    let mut by_date: BTreeMap<NaiveDate, PricePoint> = BTreeMap::new();

    for row in &table.rows {
        let Some(close) = row.close else { continue };
        by_date.insert(
            row.date,
            PricePoint {
                date: row.date,
                open: row.open.unwrap_or(close),
                high: row.high.unwrap_or(close),
                low: row.low.unwrap_or(close),
                close,
                volume: row.volume.unwrap_or(0),
            },
        );
    }

    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpir_core::RawPriceRow;

    fn row(date: &str, close: Option<f64>) -> RawPriceRow {
        RawPriceRow {
            date: date.parse().unwrap(),
            open: close.map(|c| c - 1.0),
            high: close.map(|c| c + 1.0),
            low: close.map(|c| c - 2.0),
            close,
            volume: Some(1000),
        }
    }

    #[test]
    fn test_empty_table() {
        assert!(normalize(&RawPriceTable::new()).is_empty());
    }

    #[test]
    fn test_sorts_ascending_and_drops_closeless_rows() {
        let table = RawPriceTable {
            rows: vec![
                row("2024-03-04", Some(110.0)),
                row("2024-03-01", Some(100.0)),
                row("2024-03-02", None),
            ],
        };

        let points = normalize(&table);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date.to_string(), "2024-03-01");
        assert_eq!(points[1].date.to_string(), "2024-03-04");
        assert_eq!(points[1].close, 110.0);
    }

    #[test]
    fn test_restated_date_later_row_wins() {
        let table = RawPriceTable {
            rows: vec![row("2024-03-01", Some(100.0)), row("2024-03-01", Some(101.5))],
        };

        let points = normalize(&table);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].close, 101.5);
    }

    #[test]
    fn test_missing_fields_fall_back_to_close() {
        let table = RawPriceTable {
            rows: vec![RawPriceRow {
                date: "2024-03-01".parse().unwrap(),
                open: None,
                high: None,
                low: None,
                close: Some(250.0),
                volume: None,
            }],
        };

        let points = normalize(&table);
        assert_eq!(points[0].open, 250.0);
        assert_eq!(points[0].high, 250.0);
        assert_eq!(points[0].low, 250.0);
        assert_eq!(points[0].volume, 0);
    }
}
