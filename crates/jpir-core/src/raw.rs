//! Raw provider payload model.
//!
//! Providers deliver inconsistently-shaped tables; these types carry them to
//! the derivation engine unmodified. Field-level gaps are `Option`s, and
//! [`lenient_f64`] absorbs the numeric shapes providers are known to emit, so
//! a malformed field degrades to "absent" instead of failing a company.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One raw daily price row as delivered by the provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRow {
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price, if reported.
    pub open: Option<f64>,
    /// Highest price, if reported.
    pub high: Option<f64>,
    /// Lowest price, if reported.
    pub low: Option<f64>,
    /// Closing price, if reported.
    pub close: Option<f64>,
    /// Trading volume, if reported.
    pub volume: Option<u64>,
}

/// A raw daily price table, in provider order.
///
/// May contain gaps, duplicate dates from restatements, and rows with
/// missing fields; the normalizer turns it into a canonical series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPriceTable {
    /// Rows as delivered, not necessarily ordered.
    pub rows: Vec<RawPriceRow>,
}

impl RawPriceTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// True when the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One raw statement table: line-item label → fiscal year → reported value.
///
/// Labels are whatever the provider used for that filing; the statement
/// aligner resolves them through its alias table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatementTable {
    items: BTreeMap<String, BTreeMap<i32, f64>>,
}

impl RawStatementTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Records a value for a line item and fiscal year.
    pub fn insert(&mut self, label: impl Into<String>, year: i32, value: f64) {
        self.items.entry(label.into()).or_default().insert(year, value);
    }

    /// Value reported for `label` in `year`, if any.
    #[must_use]
    pub fn value(&self, label: &str, year: i32) -> Option<f64> {
        self.items.get(label).and_then(|by_year| by_year.get(&year)).copied()
    }

    /// All fiscal years present anywhere in the table.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.items.values().flat_map(|by_year| by_year.keys().copied())
    }

    /// True when the table holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Raw annual statement tables for one company.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatements {
    /// Income statement line items.
    pub income: RawStatementTable,
    /// Balance sheet line items.
    pub balance: RawStatementTable,
    /// Cash flow statement line items.
    pub cash_flow: RawStatementTable,
}

impl RawStatements {
    /// True when all three tables are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.balance.is_empty() && self.cash_flow.is_empty()
    }
}

/// One raw dividend payment event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDividendEvent {
    /// Payment date.
    pub date: NaiveDate,
    /// Per-share amount.
    pub amount: f64,
}

/// Raw analyst recommendation counts as delivered by the provider.
///
/// Bucket counts and the key/mean summary arrive from different provider
/// endpoints and either half may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecommendations {
    /// Provider's period tag for the counts (e.g. `0m`).
    pub period: Option<String>,
    /// Strong-buy count.
    pub strong_buy: Option<u32>,
    /// Buy count.
    pub buy: Option<u32>,
    /// Hold count.
    pub hold: Option<u32>,
    /// Sell count.
    pub sell: Option<u32>,
    /// Strong-sell count.
    pub strong_sell: Option<u32>,
    /// Recommendation keyword (`buy`, `hold`, ...).
    pub recommendation_key: Option<String>,
    /// Mean recommendation score.
    pub recommendation_mean: Option<f64>,
}

impl RawRecommendations {
    /// True when at least one bucket count was supplied.
    #[must_use]
    pub fn has_buckets(&self) -> bool {
        self.strong_buy.is_some()
            || self.buy.is_some()
            || self.hold.is_some()
            || self.sell.is_some()
            || self.strong_sell.is_some()
    }

    /// True when nothing at all was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_buckets()
            && self.recommendation_key.is_none()
            && self.recommendation_mean.is_none()
    }
}

/// Raw analyst price-target distribution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPriceTargets {
    /// Current market price.
    pub current: Option<f64>,
    /// Highest target.
    pub high: Option<f64>,
    /// Lowest target.
    pub low: Option<f64>,
    /// Mean target.
    pub mean: Option<f64>,
    /// Median target.
    pub median: Option<f64>,
}

impl RawPriceTargets {
    /// True when no target figure was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.mean.is_none()
            && self.median.is_none()
    }
}

/// One raw earnings-calendar row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEarningsEvent {
    /// Announcement date.
    pub date: NaiveDate,
    /// Consensus EPS estimate, if published.
    pub eps_estimate: Option<f64>,
    /// Reported EPS, if already announced.
    pub eps_actual: Option<f64>,
    /// Provider-computed percent surprise, if published.
    pub surprise_pct: Option<f64>,
}

/// Extracts a finite number from the value shapes providers are known to
/// emit: a plain number, a numeric string (with thousands separators), or a
/// `{"raw": n, "fmt": "..."}` wrapper object.
///
/// Anything else — including non-finite values — is treated as absent rather
/// than an error, per the malformed-input policy.
#[must_use]
pub fn lenient_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        Value::Object(map) => map.get("raw").and_then(Value::as_f64),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_f64_shapes() {
        assert_eq!(lenient_f64(&json!(12.5)), Some(12.5));
        assert_eq!(lenient_f64(&json!("12.5")), Some(12.5));
        assert_eq!(lenient_f64(&json!("1,234,500")), Some(1_234_500.0));
        assert_eq!(lenient_f64(&json!({"raw": 42.0, "fmt": "42"})), Some(42.0));
    }

    #[test]
    fn test_lenient_f64_rejects_garbage() {
        assert_eq!(lenient_f64(&json!(null)), None);
        assert_eq!(lenient_f64(&json!("N/A")), None);
        assert_eq!(lenient_f64(&json!("NaN")), None);
        assert_eq!(lenient_f64(&json!({"fmt": "42"})), None);
        assert_eq!(lenient_f64(&json!([1.0])), None);
    }

    #[test]
    fn test_statement_table_lookup() {
        let mut table = RawStatementTable::new();
        table.insert("TotalRevenue", 2024, 1000.0);
        table.insert("TotalRevenue", 2023, 900.0);

        assert_eq!(table.value("TotalRevenue", 2024), Some(1000.0));
        assert_eq!(table.value("TotalRevenue", 2022), None);
        assert_eq!(table.value("GrossProfit", 2024), None);

        let mut years: Vec<i32> = table.years().collect();
        years.sort_unstable();
        assert_eq!(years, vec![2023, 2024]);
    }

    #[test]
    fn test_recommendations_bucket_detection() {
        let empty = RawRecommendations::default();
        assert!(empty.is_empty());
        assert!(!empty.has_buckets());

        let info_only = RawRecommendations {
            recommendation_key: Some("buy".to_owned()),
            recommendation_mean: Some(2.0),
            ..Default::default()
        };
        assert!(!info_only.is_empty());
        assert!(!info_only.has_buckets());

        let with_buckets = RawRecommendations {
            strong_buy: Some(2),
            ..Default::default()
        };
        assert!(with_buckets.has_buckets());
    }
}
