//! Statement aligner.
//!
//! Merges the raw annual statement tables into an ordered-by-year sequence of
//! aligned [`StatementYear`]s, resolving provider label drift through a fixed
//! alias table. Absent fields stay absent — alignment never substitutes zero
//! for a value the provider did not report.

use std::collections::BTreeSet;

use jpir_core::{RawStatementTable, RawStatements, StatementYear};

use crate::util::round2;

/// Maximum number of fiscal years carried in the output.
pub const MAX_YEARS: usize = 5;

// Provider label sets per canonical field, preferred label first. Older
// provider versions used the long activity-style labels; both are recognized.
const REVENUE: &[&str] = &["TotalRevenue", "OperatingRevenue"];
const GROSS_PROFIT: &[&str] = &["GrossProfit"];
const OPERATING_INCOME: &[&str] = &["OperatingIncome"];
const EBIT: &[&str] = &["EBIT"];
const NET_INCOME: &[&str] = &["NetIncome", "NetIncomeCommonStockholders"];
const EPS: &[&str] = &["DilutedEPS", "BasicEPS"];
const TOTAL_ASSETS: &[&str] = &["TotalAssets"];
const TOTAL_EQUITY: &[&str] = &["StockholdersEquity", "TotalEquityGrossMinorityInterest"];
const TOTAL_DEBT: &[&str] = &["TotalDebt"];
const TOTAL_CASH: &[&str] = &[
    "CashAndCashEquivalents",
    "CashCashEquivalentsAndShortTermInvestments",
];
const CURRENT_ASSETS: &[&str] = &["CurrentAssets", "TotalCurrentAssets"];
const CURRENT_LIABILITIES: &[&str] = &["CurrentLiabilities", "TotalCurrentLiabilities"];
const OPERATING_CF: &[&str] = &[
    "OperatingCashFlow",
    "CashFlowFromContinuingOperatingActivities",
];
const INVESTING_CF: &[&str] = &[
    "InvestingCashFlow",
    "CashFlowFromContinuingInvestingActivities",
];
const FINANCING_CF: &[&str] = &[
    "FinancingCashFlow",
    "CashFlowFromContinuingFinancingActivities",
];
const FREE_CF: &[&str] = &["FreeCashFlow"];

/// Aligns the raw statement tables into up to [`MAX_YEARS`] fiscal years,
/// newest first.
///
/// The year set is the union of the years present in the three tables; a
/// year is kept only if at least one recognized field has a value. Years
/// need not be contiguous and gaps are never filled with synthesized
/// entries.
#[must_use]
pub fn align(statements: &RawStatements) -> Vec<StatementYear> {
    let mut years: BTreeSet<i32> = BTreeSet::new();
    years.extend(statements.income.years());
    years.extend(statements.balance.years());
    years.extend(statements.cash_flow.years());

    years
        .into_iter()
        .rev()
        .filter_map(|year| {
            let aligned = align_year(statements, year);
            aligned.has_values().then_some(aligned)
        })
        .take(MAX_YEARS)
        .collect()
}

/// Builds the aligned entry for one fiscal year.
fn align_year(statements: &RawStatements, year: i32) -> StatementYear {
    let income = &statements.income;
    let balance = &statements.balance;
    let cash = &statements.cash_flow;

    let operating_cf = resolve(cash, OPERATING_CF, year);
    let investing_cf = resolve(cash, INVESTING_CF, year);
    // A provider-supplied figure wins; the sum of operating and investing
    // flows is the fallback.
    let free_cf = resolve(cash, FREE_CF, year).or_else(|| match (operating_cf, investing_cf) {
        (Some(op), Some(inv)) => Some(op + inv),
        _ => None,
    });

    StatementYear {
        year,
        revenue: resolve(income, REVENUE, year),
        gross_profit: resolve(income, GROSS_PROFIT, year),
        operating_income: resolve(income, OPERATING_INCOME, year),
        ebit: resolve(income, EBIT, year),
        net_income: resolve(income, NET_INCOME, year),
        eps: resolve(income, EPS, year).map(round2),
        total_assets: resolve(balance, TOTAL_ASSETS, year),
        total_equity: resolve(balance, TOTAL_EQUITY, year),
        total_debt: resolve(balance, TOTAL_DEBT, year),
        total_cash: resolve(balance, TOTAL_CASH, year),
        current_assets: resolve(balance, CURRENT_ASSETS, year),
        current_liabilities: resolve(balance, CURRENT_LIABILITIES, year),
        operating_cf,
        investing_cf,
        financing_cf: resolve(cash, FINANCING_CF, year),
        free_cf,
    }
}

/// First alias with a reported value wins.
fn resolve(table: &RawStatementTable, aliases: &[&str], year: i32) -> Option<f64> {
    aliases.iter().find_map(|label| table.value(label, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income_only(pairs: &[(&str, i32, f64)]) -> RawStatements {
        let mut statements = RawStatements::default();
        for &(label, year, value) in pairs {
            statements.income.insert(label, year, value);
        }
        statements
    }

    #[test]
    fn test_empty_statements_align_to_nothing() {
        assert!(align(&RawStatements::default()).is_empty());
    }

    #[test]
    fn test_missing_year_is_never_synthesized() {
        let statements = income_only(&[
            ("TotalRevenue", 2023, 1200.0),
            ("TotalRevenue", 2021, 1000.0),
        ]);

        let years = align(&statements);
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2023);
        assert_eq!(years[1].year, 2021);
    }

    #[test]
    fn test_caps_at_five_newest_years() {
        let statements = income_only(&[
            ("TotalRevenue", 2018, 1.0),
            ("TotalRevenue", 2019, 2.0),
            ("TotalRevenue", 2020, 3.0),
            ("TotalRevenue", 2021, 4.0),
            ("TotalRevenue", 2022, 5.0),
            ("TotalRevenue", 2023, 6.0),
            ("TotalRevenue", 2024, 7.0),
        ]);

        let years = align(&statements);
        assert_eq!(years.len(), MAX_YEARS);
        assert_eq!(years.first().map(|y| y.year), Some(2024));
        assert_eq!(years.last().map(|y| y.year), Some(2020));
    }

    #[test]
    fn test_alias_fallback() {
        let mut statements = RawStatements::default();
        statements.balance.insert("TotalEquityGrossMinorityInterest", 2024, 5000.0);
        statements.balance.insert("StockholdersEquity", 2023, 4500.0);

        let years = align(&statements);
        assert_eq!(years[0].total_equity, Some(5000.0));
        assert_eq!(years[1].total_equity, Some(4500.0));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let statements = income_only(&[("TotalRevenue", 2024, 1000.0)]);

        let year = &align(&statements)[0];
        assert_eq!(year.revenue, Some(1000.0));
        assert!(year.net_income.is_none());
        assert!(year.total_assets.is_none());
        assert!(year.operating_cf.is_none());
    }

    #[test]
    fn test_free_cf_prefers_provider_figure() {
        let mut statements = RawStatements::default();
        statements.cash_flow.insert("OperatingCashFlow", 2024, 800.0);
        statements.cash_flow.insert("InvestingCashFlow", 2024, -300.0);
        statements.cash_flow.insert("FreeCashFlow", 2024, 480.0);

        let year = &align(&statements)[0];
        assert_eq!(year.free_cf, Some(480.0));
    }

    #[test]
    fn test_free_cf_falls_back_to_sum() {
        let mut statements = RawStatements::default();
        statements.cash_flow.insert("OperatingCashFlow", 2024, 800.0);
        statements.cash_flow.insert("InvestingCashFlow", 2024, -300.0);

        let year = &align(&statements)[0];
        assert_eq!(year.free_cf, Some(500.0));
    }

    #[test]
    fn test_free_cf_absent_without_both_flows() {
        let mut statements = RawStatements::default();
        statements.cash_flow.insert("OperatingCashFlow", 2024, 800.0);

        let year = &align(&statements)[0];
        assert!(year.free_cf.is_none());
    }

    #[test]
    fn test_eps_rounded_to_two_places() {
        let statements = income_only(&[("DilutedEPS", 2024, 123.456_78)]);
        assert_eq!(align(&statements)[0].eps, Some(123.46));
    }

    #[test]
    fn test_year_union_across_tables() {
        let mut statements = RawStatements::default();
        statements.income.insert("TotalRevenue", 2024, 1000.0);
        statements.balance.insert("TotalAssets", 2023, 9000.0);
        statements.cash_flow.insert("OperatingCashFlow", 2022, 700.0);

        let years = align(&statements);
        let labels: Vec<i32> = years.iter().map(|y| y.year).collect();
        assert_eq!(labels, vec![2024, 2023, 2022]);
    }
}
