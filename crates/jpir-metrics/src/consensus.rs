//! Analyst consensus aggregator.
//!
//! Merges the three independent analyst payloads — recommendation counts,
//! price-target distribution and the earnings-date table — into the
//! consensus summary. The payloads come from separate provider endpoints
//! and the absence of one never blocks the others.

use chrono::{DateTime, Utc};
use jpir_core::{
    EarningsCalendar, EarningsEntry, RawEarningsEvent, RawPriceTargets, RawRecommendations,
    RecommendationSummary, TargetPriceSummary,
};

use crate::util::round2;

/// Number of past earnings entries carried in the output.
pub const PAST_EARNINGS: usize = 5;

/// Summarizes recommendation counts.
///
/// `total_analysts` is the sum of the five buckets. A payload carrying only
/// the key/mean summary surfaces those with a zero total.
#[must_use]
pub fn summarize_recommendations(raw: Option<&RawRecommendations>) -> RecommendationSummary {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return RecommendationSummary::default();
    };

    let strong_buy = raw.strong_buy.unwrap_or(0);
    let buy = raw.buy.unwrap_or(0);
    let hold = raw.hold.unwrap_or(0);
    let sell = raw.sell.unwrap_or(0);
    let strong_sell = raw.strong_sell.unwrap_or(0);

    RecommendationSummary {
        strong_buy,
        buy,
        hold,
        sell,
        strong_sell,
        total_analysts: strong_buy + buy + hold + sell + strong_sell,
        recommendation_key: raw.recommendation_key.clone(),
        recommendation_mean: raw.recommendation_mean,
        has_data: true,
    }
}

/// Summarizes the price-target distribution.
#[must_use]
pub fn summarize_targets(raw: Option<&RawPriceTargets>) -> TargetPriceSummary {
    let Some(raw) = raw.filter(|t| !t.is_empty()) else {
        return TargetPriceSummary::default();
    };

    TargetPriceSummary {
        current: raw.current,
        high: raw.high,
        low: raw.low,
        mean: raw.mean,
        median: raw.median,
        has_data: true,
    }
}

/// Partitions the earnings table at `now` into the next announcement and the
/// most recent past results.
///
/// A row dated strictly after `now` is future; `next` is the earliest such
/// row. Past rows must carry a reported or estimated EPS and are kept newest
/// first, capped at [`PAST_EARNINGS`]. `surprise_pct` is passed through when
/// the provider supplied it and computed from actual/estimate otherwise.
#[must_use]
pub fn partition_earnings(events: &[RawEarningsEvent], now: DateTime<Utc>) -> EarningsCalendar {
    if events.is_empty() {
        return EarningsCalendar::default();
    }

    let today = now.date_naive();
    let mut future: Vec<&RawEarningsEvent> = Vec::new();
    let mut past: Vec<&RawEarningsEvent> = Vec::new();
    for event in events {
        if event.date > today {
            future.push(event);
        } else {
            past.push(event);
        }
    }

    future.sort_by_key(|e| e.date);
    past.sort_by_key(|e| std::cmp::Reverse(e.date));

    let next = future.first().copied().map(entry);
    let past = past
        .into_iter()
        .filter(|e| e.eps_actual.is_some() || e.eps_estimate.is_some())
        .take(PAST_EARNINGS)
        .map(entry)
        .collect();

    EarningsCalendar {
        next,
        past,
        has_data: true,
    }
}

fn entry(event: &RawEarningsEvent) -> EarningsEntry {
    EarningsEntry {
        date: event.date,
        eps_estimate: event.eps_estimate,
        eps_actual: event.eps_actual,
        surprise_pct: event
            .surprise_pct
            .or_else(|| surprise(event.eps_actual, event.eps_estimate)),
    }
}

/// Percent surprise of actual over estimate, when both are present and the
/// estimate is non-zero.
fn surprise(actual: Option<f64>, estimate: Option<f64>) -> Option<f64> {
    match (actual, estimate) {
        (Some(a), Some(e)) if e != 0.0 => Some(round2((a - e) / e.abs() * 100.0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(date: &str) -> DateTime<Utc> {
        format!("{date}T09:00:00Z").parse().unwrap()
    }

    fn event(date: &str, estimate: Option<f64>, actual: Option<f64>) -> RawEarningsEvent {
        RawEarningsEvent {
            date: date.parse().unwrap(),
            eps_estimate: estimate,
            eps_actual: actual,
            surprise_pct: None,
        }
    }

    #[test]
    fn test_total_analysts_is_bucket_sum() {
        let raw = RawRecommendations {
            strong_buy: Some(2),
            buy: Some(5),
            hold: Some(3),
            sell: Some(0),
            strong_sell: Some(0),
            ..Default::default()
        };

        let summary = summarize_recommendations(Some(&raw));
        assert_eq!(summary.total_analysts, 10);
        assert!(summary.has_data);
    }

    #[test]
    fn test_key_mean_only_payload_has_zero_total() {
        let raw = RawRecommendations {
            recommendation_key: Some("buy".to_owned()),
            recommendation_mean: Some(2.1),
            ..Default::default()
        };

        let summary = summarize_recommendations(Some(&raw));
        assert_eq!(summary.total_analysts, 0);
        assert_eq!(summary.recommendation_key.as_deref(), Some("buy"));
        assert_eq!(summary.recommendation_mean, Some(2.1));
        assert!(summary.has_data);
    }

    #[test]
    fn test_absent_recommendations() {
        let summary = summarize_recommendations(None);
        assert!(!summary.has_data);
        assert_eq!(summary.total_analysts, 0);
        assert!(summary.recommendation_key.is_none());
    }

    #[test]
    fn test_empty_targets_do_not_claim_data() {
        assert!(!summarize_targets(Some(&RawPriceTargets::default())).has_data);

        let raw = RawPriceTargets {
            mean: Some(3500.0),
            ..Default::default()
        };
        let summary = summarize_targets(Some(&raw));
        assert!(summary.has_data);
        assert_eq!(summary.mean, Some(3500.0));
        assert!(summary.median.is_none());
    }

    #[test]
    fn test_earnings_partition() {
        let events = vec![
            event("2026-11-05", Some(120.0), None),
            event("2026-08-04", Some(110.0), Some(115.0)),
            event("2026-05-08", Some(100.0), Some(95.0)),
            event("2027-02-04", Some(125.0), None),
        ];

        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert!(calendar.has_data);

        let next = calendar.next.unwrap();
        assert_eq!(next.date, NaiveDate::from_ymd_opt(2026, 11, 5).unwrap());

        let past_dates: Vec<String> = calendar.past.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(past_dates, vec!["2026-08-04", "2026-05-08"]);
    }

    #[test]
    fn test_past_requires_a_result() {
        let events = vec![
            event("2026-08-04", None, None),
            event("2026-05-08", Some(100.0), Some(95.0)),
        ];

        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert_eq!(calendar.past.len(), 1);
        assert_eq!(calendar.past[0].eps_actual, Some(95.0));
    }

    #[test]
    fn test_past_caps_at_five() {
        let events: Vec<RawEarningsEvent> = (1..=8)
            .map(|month| event(&format!("2025-{month:02}-15"), Some(10.0), Some(11.0)))
            .collect();

        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert_eq!(calendar.past.len(), PAST_EARNINGS);
        assert_eq!(calendar.past[0].date.to_string(), "2025-08-15");
    }

    #[test]
    fn test_surprise_computed_when_missing() {
        let events = vec![event("2026-05-08", Some(100.0), Some(95.0))];
        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert_eq!(calendar.past[0].surprise_pct, Some(-5.0));
    }

    #[test]
    fn test_surprise_passed_through_when_supplied() {
        let events = vec![RawEarningsEvent {
            date: "2026-05-08".parse().unwrap(),
            eps_estimate: Some(100.0),
            eps_actual: Some(95.0),
            surprise_pct: Some(-4.9),
        }];

        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert_eq!(calendar.past[0].surprise_pct, Some(-4.9));
    }

    #[test]
    fn test_surprise_guards_zero_estimate() {
        let events = vec![event("2026-05-08", Some(0.0), Some(5.0))];
        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert!(calendar.past[0].surprise_pct.is_none());
    }

    #[test]
    fn test_surprise_uses_absolute_estimate() {
        // A loss narrower than estimated is a positive surprise.
        let events = vec![event("2026-05-08", Some(-10.0), Some(-8.0))];
        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert_eq!(calendar.past[0].surprise_pct, Some(20.0));
    }

    #[test]
    fn test_event_on_run_date_counts_as_past() {
        let events = vec![event("2026-08-07", Some(100.0), None)];
        let calendar = partition_earnings(&events, at("2026-08-07"));
        assert!(calendar.next.is_none());
        assert_eq!(calendar.past.len(), 1);
    }
}
