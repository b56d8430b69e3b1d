//! Dividend aggregator.
//!
//! Rolls the raw per-payment dividend event stream into per-calendar-year
//! totals.

use std::collections::BTreeMap;

use chrono::Datelike;
use jpir_core::{DividendHistory, DividendYear, RawDividendEvent};

use crate::statements::MAX_YEARS;
use crate::util::round2;

/// Aggregates dividend events into yearly totals, newest first, capped at
/// the statement year window.
///
/// Amounts paid in the same calendar year are summed; `latest` is the most
/// recent year's total. An empty stream yields an empty history with
/// `has_data` false.
#[must_use]
pub fn aggregate(events: &[RawDividendEvent]) -> DividendHistory {
    if events.is_empty() {
        return DividendHistory::default();
    }

    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for event in events {
        *by_year.entry(event.date.year()).or_insert(0.0) += event.amount;
    }

    let history: Vec<DividendYear> = by_year
        .into_iter()
        .rev()
        .take(MAX_YEARS)
        .map(|(year, amount)| DividendYear {
            year,
            amount: round2(amount),
        })
        .collect();

    let latest = history.first().map(|d| d.amount);

    DividendHistory {
        history,
        latest,
        has_data: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str, amount: f64) -> RawDividendEvent {
        RawDividendEvent {
            date: date.parse().unwrap(),
            amount,
        }
    }

    #[test]
    fn test_empty_stream() {
        let rollup = aggregate(&[]);
        assert!(rollup.history.is_empty());
        assert!(rollup.latest.is_none());
        assert!(!rollup.has_data);
    }

    #[test]
    fn test_same_year_amounts_are_summed() {
        let rollup = aggregate(&[event("2024-06-28", 50.0), event("2024-12-27", 45.0)]);

        assert_eq!(rollup.history.len(), 1);
        assert_eq!(rollup.history[0].year, 2024);
        assert_eq!(rollup.history[0].amount, 95.0);
        assert_eq!(rollup.latest, Some(95.0));
        assert!(rollup.has_data);
    }

    #[test]
    fn test_latest_is_most_recent_year_total() {
        let rollup = aggregate(&[
            event("2023-06-29", 40.0),
            event("2023-12-27", 40.0),
            event("2024-06-27", 50.0),
        ]);

        assert_eq!(rollup.latest, Some(50.0));
        let years: Vec<i32> = rollup.history.iter().map(|d| d.year).collect();
        assert_eq!(years, vec![2024, 2023]);
    }

    #[test]
    fn test_caps_at_statement_window() {
        let events: Vec<RawDividendEvent> = (2017..=2024)
            .map(|year| event(&format!("{year}-06-28"), 10.0))
            .collect();

        let rollup = aggregate(&events);
        assert_eq!(rollup.history.len(), MAX_YEARS);
        assert_eq!(rollup.history.first().map(|d| d.year), Some(2024));
        assert_eq!(rollup.history.last().map(|d| d.year), Some(2020));
    }
}
