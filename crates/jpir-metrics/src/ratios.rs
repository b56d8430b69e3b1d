//! Ratio calculator.
//!
//! Pure per-year derivation of profitability, leverage and liquidity ratios.
//! A ratio is computed only when both operands are present and the
//! denominator is non-zero; everything else stays absent — never zero, never
//! an error.

use jpir_core::{DerivedRatios, StatementYear};

use crate::util::round2;

/// Derives the ratio set for one aligned statement year.
#[must_use]
pub fn derive(year: &StatementYear) -> DerivedRatios {
    DerivedRatios {
        operating_margin: pct(year.operating_income, year.revenue),
        net_margin: pct(year.net_income, year.revenue),
        roe: pct(year.net_income, year.total_equity),
        roa: pct(year.net_income, year.total_assets),
        equity_ratio: pct(year.total_equity, year.total_assets),
        de_ratio: times(year.total_debt, year.total_equity),
        current_ratio: times(year.current_assets, year.current_liabilities),
    }
}

/// Numerator over denominator as a percentage, two decimal places.
fn pct(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    guarded(numerator, denominator).map(|r| round2(r * 100.0))
}

/// Numerator over denominator as a multiple, two decimal places.
fn times(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    guarded(numerator, denominator).map(round2)
}

fn guarded(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_year_ratios() {
        let year = StatementYear {
            revenue: Some(10_000.0),
            operating_income: Some(1_500.0),
            net_income: Some(900.0),
            total_assets: Some(20_000.0),
            total_equity: Some(8_000.0),
            total_debt: Some(4_000.0),
            current_assets: Some(6_000.0),
            current_liabilities: Some(2_500.0),
            ..StatementYear::new(2024)
        };

        let ratios = derive(&year);
        assert_eq!(ratios.operating_margin, Some(15.0));
        assert_eq!(ratios.net_margin, Some(9.0));
        assert_eq!(ratios.roe, Some(11.25));
        assert_eq!(ratios.roa, Some(4.5));
        assert_eq!(ratios.equity_ratio, Some(40.0));
        assert_eq!(ratios.de_ratio, Some(0.5));
        assert_eq!(ratios.current_ratio, Some(2.4));
    }

    #[test]
    fn test_zero_denominator_yields_absent() {
        let year = StatementYear {
            net_income: Some(900.0),
            total_equity: Some(0.0),
            ..StatementYear::new(2024)
        };

        let ratios = derive(&year);
        assert!(ratios.roe.is_none());
    }

    #[test]
    fn test_missing_operand_yields_absent() {
        let year = StatementYear {
            revenue: Some(10_000.0),
            ..StatementYear::new(2024)
        };

        let ratios = derive(&year);
        assert!(ratios.operating_margin.is_none());
        assert!(ratios.net_margin.is_none());
        assert!(ratios.current_ratio.is_none());
    }

    #[test]
    fn test_zero_numerator_is_a_real_zero() {
        let year = StatementYear {
            net_income: Some(0.0),
            revenue: Some(10_000.0),
            ..StatementYear::new(2024)
        };

        assert_eq!(derive(&year).net_margin, Some(0.0));
    }

    #[test]
    fn test_idempotent() {
        let year = StatementYear {
            revenue: Some(3_333.0),
            operating_income: Some(1_111.0),
            net_income: Some(777.0),
            total_assets: Some(9_999.0),
            total_equity: Some(5_555.0),
            ..StatementYear::new(2024)
        };

        assert_eq!(derive(&year), derive(&year));
    }
}
