//! Core data types for the company data pipeline.
//!
//! This module defines the canonical and derived data structures:
//!
//! - [`StockCode`] - Security code with market-suffix handling
//! - [`PricePoint`] - Canonical daily price record
//! - [`PriceTrend`] - Moving-average deviation summary
//! - [`StatementYear`] / [`DerivedRatios`] - One aligned fiscal year and its ratios
//! - [`DividendHistory`] - Per-year dividend rollup
//! - [`RecommendationSummary`] / [`TargetPriceSummary`] / [`EarningsCalendar`] - Analyst consensus
//! - [`CompanyRecord`] / [`ConsensusRecord`] - Assembled output documents
//!
//! Output documents render absent values as JSON `null` rather than omitting
//! the key, so the schema is identical across companies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market suffix appended to security codes for the data provider.
pub const MARKET_SUFFIX: &str = ".T";

/// A listed-company security code.
///
/// Codes are uppercased and stripped of any market suffix on creation, so
/// `"7203"`, `"7203.t"` and `"7203.T"` all name the same security.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StockCode(String);

impl StockCode {
    /// Creates a new code, normalizing case and dropping the market suffix.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into().trim().to_uppercase();
        let s = s.strip_suffix(MARKET_SUFFIX).map_or(s.clone(), str::to_owned);
        Self(s)
    }

    /// Returns the bare code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the full provider ticker, code plus market suffix (`7203.T`).
    #[must_use]
    pub fn ticker(&self) -> String {
        format!("{}{MARKET_SUFFIX}", self.0)
    }
}

impl fmt::Display for StockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StockCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for StockCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StockCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One roster row: security code and display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Security code.
    pub code: StockCode,
    /// Company display name.
    pub name: String,
}

impl RosterEntry {
    /// Creates a new roster entry.
    #[must_use]
    pub fn new(code: impl Into<StockCode>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// One canonical daily price record.
///
/// Sequences of price points are ascending by date with no duplicate dates;
/// the normalizer in `jpir-metrics` establishes that invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest price of the day.
    pub high: f64,
    /// Lowest price of the day.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Trading volume.
    pub volume: u64,
}

/// Direction of the latest close relative to a moving average.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Latest close is above the average beyond the threshold band.
    Up,
    /// Latest close is below the average beyond the threshold band.
    Down,
    /// Inside the threshold band, or not enough history to tell.
    #[default]
    Neutral,
}

/// Moving-average value and deviation for a single window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    /// Window length in trading days.
    pub window: usize,
    /// Simple moving average of the most recent `window` closes; absent when
    /// the series is shorter than the window.
    pub ma_value: Option<f64>,
    /// Percentage gap between the latest close and `ma_value`.
    pub deviation_pct: Option<f64>,
    /// Classification of `deviation_pct` against the threshold band.
    pub trend: Trend,
}

impl MovingAverage {
    /// Result for a window with insufficient history.
    #[must_use]
    pub const fn insufficient(window: usize) -> Self {
        Self {
            window,
            ma_value: None,
            deviation_pct: None,
            trend: Trend::Neutral,
        }
    }
}

/// Moving-average deviation summary across the four classifier windows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceTrend {
    /// 5-day window.
    pub ma_5: MovingAverage,
    /// 25-day window.
    pub ma_25: MovingAverage,
    /// 75-day window.
    pub ma_75: MovingAverage,
    /// 200-day window.
    pub ma_200: MovingAverage,
}

impl Default for PriceTrend {
    fn default() -> Self {
        Self {
            ma_5: MovingAverage::insufficient(5),
            ma_25: MovingAverage::insufficient(25),
            ma_75: MovingAverage::insufficient(75),
            ma_200: MovingAverage::insufficient(200),
        }
    }
}

/// One fiscal year of aligned statement line items.
///
/// Absent fields stay absent; the aligner never substitutes zero for a
/// missing value, so ratio computation can tell "not reported" from "zero".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementYear {
    /// Fiscal year.
    pub year: i32,

    // Income statement
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Earnings before interest and taxes.
    pub ebit: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Diluted earnings per share.
    pub eps: Option<f64>,

    // Balance sheet
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Stockholders' equity.
    pub total_equity: Option<f64>,
    /// Total interest-bearing debt.
    pub total_debt: Option<f64>,
    /// Cash and cash equivalents.
    pub total_cash: Option<f64>,
    /// Current assets. Input to `current_ratio`; not part of the published document.
    #[serde(skip)]
    pub current_assets: Option<f64>,
    /// Current liabilities. Input to `current_ratio`; not part of the published document.
    #[serde(skip)]
    pub current_liabilities: Option<f64>,

    // Cash flow
    /// Operating cash flow.
    pub operating_cf: Option<f64>,
    /// Investing cash flow.
    pub investing_cf: Option<f64>,
    /// Financing cash flow.
    pub financing_cf: Option<f64>,
    /// Free cash flow.
    pub free_cf: Option<f64>,
}

impl StatementYear {
    /// Creates an all-absent year.
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// True when at least one line item besides the year itself is present.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.revenue.is_some()
            || self.gross_profit.is_some()
            || self.operating_income.is_some()
            || self.ebit.is_some()
            || self.net_income.is_some()
            || self.eps.is_some()
            || self.total_assets.is_some()
            || self.total_equity.is_some()
            || self.total_debt.is_some()
            || self.total_cash.is_some()
            || self.current_assets.is_some()
            || self.current_liabilities.is_some()
            || self.operating_cf.is_some()
            || self.investing_cf.is_some()
            || self.financing_cf.is_some()
            || self.free_cf.is_some()
    }
}

/// Ratios derived from one [`StatementYear`].
///
/// Each ratio is present only when its operands are present and the
/// denominator is non-zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedRatios {
    /// Operating income over revenue, percent.
    pub operating_margin: Option<f64>,
    /// Net income over revenue, percent.
    pub net_margin: Option<f64>,
    /// Net income over equity, percent.
    pub roe: Option<f64>,
    /// Net income over assets, percent.
    pub roa: Option<f64>,
    /// Equity over assets, percent.
    pub equity_ratio: Option<f64>,
    /// Debt over equity, as a multiple.
    pub de_ratio: Option<f64>,
    /// Current assets over current liabilities, as a multiple.
    pub current_ratio: Option<f64>,
}

/// One fiscal year of the published financials: statement fields plus ratios,
/// flattened into a single object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialYear {
    /// Aligned statement line items.
    #[serde(flatten)]
    pub statement: StatementYear,
    /// Ratios derived from the statement.
    #[serde(flatten)]
    pub ratios: DerivedRatios,
}

/// Financials sub-document: up to five aligned years, newest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    /// Aligned years, descending by fiscal year.
    pub years: Vec<FinancialYear>,
    /// True iff at least one year was produced.
    pub has_data: bool,
}

/// Total dividend paid in one calendar year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DividendYear {
    /// Calendar year of payment.
    pub year: i32,
    /// Sum of per-event amounts in that year.
    pub amount: f64,
}

/// Per-year dividend rollup, newest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendHistory {
    /// Yearly totals, descending by year, capped at the statement window.
    pub history: Vec<DividendYear>,
    /// Total for the most recent year present; absent for an empty stream.
    pub latest: Option<f64>,
    /// True iff the event stream was non-empty.
    pub has_data: bool,
}

/// Analyst recommendation bucket counts and summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    /// Strong-buy count.
    pub strong_buy: u32,
    /// Buy count.
    pub buy: u32,
    /// Hold count.
    pub hold: u32,
    /// Sell count.
    pub sell: u32,
    /// Strong-sell count.
    pub strong_sell: u32,
    /// Sum of the five buckets.
    pub total_analysts: u32,
    /// Provider's recommendation keyword (`buy`, `hold`, ...).
    pub recommendation_key: Option<String>,
    /// Provider's mean recommendation score.
    pub recommendation_mean: Option<f64>,
    /// True iff the provider supplied any recommendation data.
    pub has_data: bool,
}

/// Analyst price-target distribution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetPriceSummary {
    /// Current market price at fetch time.
    pub current: Option<f64>,
    /// Highest analyst target.
    pub high: Option<f64>,
    /// Lowest analyst target.
    pub low: Option<f64>,
    /// Mean target.
    pub mean: Option<f64>,
    /// Median target.
    pub median: Option<f64>,
    /// True iff the provider supplied any target data.
    pub has_data: bool,
}

/// One earnings-calendar entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsEntry {
    /// Announcement date.
    pub date: NaiveDate,
    /// Consensus EPS estimate.
    pub eps_estimate: Option<f64>,
    /// Reported EPS.
    pub eps_actual: Option<f64>,
    /// Percent surprise of actual over estimate.
    pub surprise_pct: Option<f64>,
}

/// Earnings dates partitioned at the run timestamp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsCalendar {
    /// Earliest future-dated entry, if any.
    pub next: Option<EarningsEntry>,
    /// Most recent past entries carrying a result, newest first, capped at 5.
    pub past: Vec<EarningsEntry>,
    /// True iff the provider supplied any earnings dates.
    pub has_data: bool,
}

/// Company reference information attached to the metrics document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Company name.
    pub name: Option<String>,
    /// Primary exchange.
    pub exchange: Option<String>,
    /// Trading currency.
    pub currency: Option<String>,
    /// Business sector.
    pub sector: Option<String>,
    /// Industry within the sector.
    pub industry: Option<String>,
    /// Corporate website.
    pub website: Option<String>,
    /// Full-time employee count.
    pub employees: Option<u64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Business description.
    pub summary: Option<String>,
}

/// The assembled per-company metrics document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// False when a fetch-layer failure produced an all-absent document.
    pub success: bool,
    /// Wall-clock timestamp of the run that produced this record.
    pub fetched_at: DateTime<Utc>,
    /// Bare security code.
    pub ticker: String,
    /// Code plus market suffix.
    pub ticker_full: String,
    /// Company display name.
    pub company_name: Option<String>,
    /// Company reference information.
    pub company_info: Option<CompanyProfile>,
    /// Moving-average deviation summary.
    pub price_trend: PriceTrend,
    /// Aligned statement years with derived ratios.
    pub financials: Financials,
    /// Per-year dividend rollup.
    pub dividends: DividendHistory,
    /// Description of the failure when `success` is false.
    pub error: Option<String>,
}

impl CompanyRecord {
    /// An all-absent failure document for `code`.
    #[must_use]
    pub fn failure(code: &StockCode, error: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            success: false,
            fetched_at,
            ticker: code.as_str().to_owned(),
            ticker_full: code.ticker(),
            company_name: None,
            company_info: None,
            price_trend: PriceTrend::default(),
            financials: Financials::default(),
            dividends: DividendHistory::default(),
            error: Some(error.into()),
        }
    }
}

/// The assembled per-company analyst-consensus document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRecord {
    /// False when a fetch-layer failure produced an all-absent document.
    pub success: bool,
    /// Wall-clock timestamp of the run that produced this record.
    pub fetched_at: DateTime<Utc>,
    /// Bare security code.
    pub ticker: String,
    /// Code plus market suffix.
    pub ticker_full: String,
    /// Company display name.
    pub company_name: Option<String>,
    /// Recommendation bucket counts and summary.
    pub analyst_recommendations: RecommendationSummary,
    /// Price-target distribution.
    pub target_prices: TargetPriceSummary,
    /// Earnings dates partitioned at the run timestamp.
    pub earnings_dates: EarningsCalendar,
    /// Description of the failure when `success` is false.
    pub error: Option<String>,
}

impl ConsensusRecord {
    /// An all-absent failure document for `code`.
    #[must_use]
    pub fn failure(code: &StockCode, error: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            success: false,
            fetched_at,
            ticker: code.as_str().to_owned(),
            ticker_full: code.ticker(),
            company_name: None,
            analyst_recommendations: RecommendationSummary::default(),
            target_prices: TargetPriceSummary::default(),
            earnings_dates: EarningsCalendar::default(),
            error: Some(error.into()),
        }
    }
}

/// The published per-company price-history artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryDocument {
    /// Bare security code.
    pub code: String,
    /// Code plus market suffix.
    pub ticker: String,
    /// Wall-clock timestamp of the run that produced this document.
    pub last_updated: DateTime<Utc>,
    /// Depth of the fetch in calendar years.
    pub period_years: u32,
    /// Number of canonical points in `data`.
    pub data_points: usize,
    /// Canonical normalized price series, ascending by date.
    pub data: Vec<PricePoint>,
}
