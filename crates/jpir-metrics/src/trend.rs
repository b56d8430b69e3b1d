//! Moving-average classifier.
//!
//! Computes simple moving averages over the canonical price series and
//! classifies the latest close's deviation from each.

use jpir_core::{MaWindow, MovingAverage, PricePoint, PriceTrend, Trend};

use crate::util::round2;

/// Deviation band, in percentage points, separating `up`/`down` from
/// `neutral`.
///
/// With the zero band, any positive deviation classifies as `up` and any
/// negative one as `down`; only an exactly-zero deviation stays `neutral`.
pub const DEVIATION_THRESHOLD: f64 = 0.0;

/// Classifies the latest close against every [`MaWindow`].
///
/// Windows longer than the series produce an absent average with a `neutral`
/// trend. Deterministic for identical input; the series is not mutated.
#[must_use]
pub fn classify(points: &[PricePoint]) -> PriceTrend {
    PriceTrend {
        ma_5: classify_window(points, MaWindow::Ma5),
        ma_25: classify_window(points, MaWindow::Ma25),
        ma_75: classify_window(points, MaWindow::Ma75),
        ma_200: classify_window(points, MaWindow::Ma200),
    }
}

/// Classifies a single window.
#[must_use]
pub fn classify_window(points: &[PricePoint], window: MaWindow) -> MovingAverage {
    let days = window.days();
    let (Some(last), Some(ma)) = (points.last(), moving_average(points, days)) else {
        return MovingAverage::insufficient(days);
    };

    if ma == 0.0 {
        // Cannot express a deviation against a zero average.
        return MovingAverage {
            window: days,
            ma_value: Some(0.0),
            deviation_pct: None,
            trend: Trend::Neutral,
        };
    }

    let deviation = round2((last.close - ma) / ma * 100.0);
    let trend = if deviation > DEVIATION_THRESHOLD {
        Trend::Up
    } else if deviation < -DEVIATION_THRESHOLD {
        Trend::Down
    } else {
        Trend::Neutral
    };

    MovingAverage {
        window: days,
        ma_value: Some(round2(ma)),
        deviation_pct: Some(deviation),
        trend,
    }
}

/// Arithmetic mean of the most recent `days` closes, absent when the series
/// is shorter than the window.
fn moving_average(points: &[PricePoint], days: usize) -> Option<f64> {
    if days == 0 || points.len() < days {
        return None;
    }
    let sum: f64 = points[points.len() - days..].iter().map(|p| p.close).sum();
    Some(sum / days as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn series(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 100,
            })
            .collect()
    }

    #[test]
    fn test_short_series_is_neutral_with_absent_values() {
        let points = series(&[100.0, 101.0, 102.0]);
        let result = classify(&points);

        for ma in [&result.ma_5, &result.ma_25, &result.ma_75, &result.ma_200] {
            assert!(ma.ma_value.is_none());
            assert!(ma.deviation_pct.is_none());
            assert_eq!(ma.trend, Trend::Neutral);
        }
    }

    #[test]
    fn test_constant_series_deviates_zero() {
        let points = series(&[500.0; 250]);
        let result = classify(&points);

        for ma in [&result.ma_5, &result.ma_25, &result.ma_75, &result.ma_200] {
            assert_eq!(ma.ma_value, Some(500.0));
            assert_eq!(ma.deviation_pct, Some(0.0));
            assert_eq!(ma.trend, Trend::Neutral);
        }
    }

    #[test]
    fn test_five_day_window_example() {
        let points = series(&[100.0, 100.0, 100.0, 100.0, 110.0]);
        let result = classify_window(&points, MaWindow::Ma5);

        assert_eq!(result.ma_value, Some(102.0));
        assert_eq!(result.deviation_pct, Some(7.84));
        assert_eq!(result.trend, Trend::Up);
    }

    #[test]
    fn test_two_hundred_day_window_example() {
        // 210 ascending closes whose most recent 200 average exactly 900.
        let mut closes = vec![880.0; 10];
        closes.extend(vec![899.0; 198]);
        closes.push(998.0);
        closes.push(1000.0);
        assert_eq!(closes.len(), 210);

        let result = classify_window(&series(&closes), MaWindow::Ma200);
        assert_eq!(result.ma_value, Some(900.0));
        assert_eq!(result.deviation_pct, Some(11.11));
        assert_eq!(result.trend, Trend::Up);
    }

    #[test]
    fn test_downtrend() {
        let mut closes = vec![100.0; 24];
        closes.push(90.0);
        let result = classify_window(&series(&closes), MaWindow::Ma25);

        assert_eq!(result.ma_value, Some(99.6));
        assert_eq!(result.deviation_pct, Some(-9.64));
        assert_eq!(result.trend, Trend::Down);
    }

    #[test]
    fn test_deterministic() {
        let points = series(&[100.0, 105.0, 95.0, 110.0, 108.0, 112.0]);
        assert_eq!(classify(&points), classify(&points));
    }

    #[test]
    fn test_zero_average_yields_no_deviation() {
        let points = series(&[0.0; 5]);
        let result = classify_window(&points, MaWindow::Ma5);

        assert_eq!(result.ma_value, Some(0.0));
        assert!(result.deviation_pct.is_none());
        assert_eq!(result.trend, Trend::Neutral);
    }
}
