#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/jpir/jpir/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo Finance market-data provider.
//!
//! This crate implements the `jpir-core` provider traits against Yahoo
//! Finance's public endpoints:
//!
//! - [`PriceHistoryProvider`] via the chart API (also the source of dividend
//!   events)
//! - [`FundamentalsProvider`] via the fundamentals-timeseries and
//!   quoteSummary APIs
//! - [`AnalystDataProvider`] via the quoteSummary API
//!
//! # Example
//!
//! ```no_run
//! use jpir_yahoo::YahooProvider;
//! use jpir_core::{PriceHistoryProvider, StockCode};
//!
//! # async fn example() -> jpir_core::Result<()> {
//! let provider = YahooProvider::new();
//! let code = StockCode::new("7203");
//!
//! let table = provider.fetch_history(&code, 1).await?;
//! println!("Fetched {} rows", table.rows.len());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use jpir_core::{
    AnalystDataProvider, CompanyProfile, DataError, FundamentalsProvider, MarketDataProvider,
    PriceHistoryProvider, RawDividendEvent, RawEarningsEvent, RawPriceRow, RawPriceTable,
    RawPriceTargets, RawRecommendations, RawStatementTable, RawStatements, Result, StockCode,
    lenient_f64,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Yahoo Finance chart API base URL.
const CHART_API_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance quote summary API base URL.
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Yahoo Finance fundamentals timeseries API base URL.
const TIMESERIES_API_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Default rate limit delay in milliseconds.
const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Calendar years of statement history requested from the timeseries API.
const FUNDAMENTALS_YEARS: i64 = 6;

/// Calendar years of dividend events requested from the chart API.
const DIVIDEND_YEARS: u32 = 6;

// Timeseries line items requested per statement, matching the aligner's
// alias table. The API prefixes each with "annual".
const INCOME_ITEMS: &[&str] = &[
    "TotalRevenue",
    "OperatingRevenue",
    "GrossProfit",
    "OperatingIncome",
    "EBIT",
    "NetIncome",
    "NetIncomeCommonStockholders",
    "DilutedEPS",
    "BasicEPS",
];
const BALANCE_ITEMS: &[&str] = &[
    "TotalAssets",
    "StockholdersEquity",
    "TotalEquityGrossMinorityInterest",
    "TotalDebt",
    "CashAndCashEquivalents",
    "CashCashEquivalentsAndShortTermInvestments",
    "CurrentAssets",
    "CurrentLiabilities",
];
const CASH_FLOW_ITEMS: &[&str] = &[
    "OperatingCashFlow",
    "InvestingCashFlow",
    "FinancingCashFlow",
    "FreeCashFlow",
];

/// Yahoo Finance data provider.
///
/// Implements [`PriceHistoryProvider`], [`FundamentalsProvider`] and
/// [`AnalystDataProvider`].
#[derive(Debug)]
pub struct YahooProvider {
    client: reqwest::Client,
    rate_limit_ms: u64,
    last_request_time: AtomicU64,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider with default settings.
    ///
    /// Uses built-in rate limiting of 1 request per second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rate_limit(Duration::from_millis(DEFAULT_RATE_LIMIT_MS))
    }

    /// Create a new provider with a custom HTTP client.
    ///
    /// Uses the provided client for all HTTP requests. Rate limiting is
    /// still applied.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Create a new provider with custom rate limiting.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn with_rate_limit(rate_limit: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            rate_limit_ms: rate_limit.as_millis() as u64,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Apply rate limiting before making a request.
    async fn apply_rate_limit(&self) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last = self.last_request_time.load(Ordering::Relaxed);
        let elapsed = now.saturating_sub(last);

        if elapsed < self.rate_limit_ms {
            let wait_time = self.rate_limit_ms - elapsed;
            debug!("Rate limiting: waiting {}ms", wait_time);
            sleep(Duration::from_millis(wait_time)).await;
        }

        self.last_request_time.store(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            Ordering::Relaxed,
        );
    }

    /// Make a rate-limited GET request and parse the JSON response.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        code: &StockCode,
        url: &str,
    ) -> Result<T> {
        self.apply_rate_limit().await;
        debug!("Yahoo request: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                provider: "Yahoo Finance".to_string(),
                retry_after: Some(Duration::from_secs(60)),
            });
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::CodeNotFound(code.to_string()));
        }

        if !response.status().is_success() {
            return Err(DataError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                code
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))
    }

    /// Build the chart API URL for a code and range.
    fn build_chart_url(&self, code: &StockCode, years: u32, with_dividends: bool) -> String {
        let end = Utc::now();
        let start = end - chrono::Duration::days(i64::from(years) * 365);
        let events = if with_dividends { "&events=div" } else { "" };

        format!(
            "{}/{}?period1={}&period2={}&interval=1d{}",
            CHART_API_URL,
            code.ticker(),
            start.timestamp(),
            end.timestamp(),
            events
        )
    }

    /// Build a quoteSummary URL for a code and module list.
    fn build_summary_url(&self, code: &StockCode, modules: &str) -> String {
        format!("{}/{}?modules={}", QUOTE_SUMMARY_URL, code.ticker(), modules)
    }

    /// Build the fundamentals-timeseries URL for a code.
    fn build_timeseries_url(&self, code: &StockCode) -> String {
        let end = Utc::now();
        let start = end - chrono::Duration::days(FUNDAMENTALS_YEARS * 365);
        let types: Vec<String> = INCOME_ITEMS
            .iter()
            .chain(BALANCE_ITEMS)
            .chain(CASH_FLOW_ITEMS)
            .map(|item| format!("annual{item}"))
            .collect();

        format!(
            "{}/{}?symbol={}&type={}&period1={}&period2={}",
            TIMESERIES_API_URL,
            code.ticker(),
            code.ticker(),
            types.join(","),
            start.timestamp(),
            end.timestamp()
        )
    }

    /// Fetch and unwrap a chart API response.
    async fn fetch_chart(
        &self,
        code: &StockCode,
        years: u32,
        with_dividends: bool,
    ) -> Result<ChartData> {
        let url = self.build_chart_url(code, years, with_dividends);
        let response: ChartResponse = self.get_json(code, &url).await?;

        if let Some(error) = response.chart.error {
            if error.code == "Not Found" {
                return Err(DataError::CodeNotFound(code.to_string()));
            }
            return Err(DataError::Other(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        response
            .chart
            .result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::CodeNotFound(code.to_string()))
    }

    /// Fetch and unwrap a quoteSummary response.
    async fn fetch_summary(&self, code: &StockCode, modules: &str) -> Result<QuoteSummaryData> {
        let url = self.build_summary_url(code, modules);
        let response: QuoteSummaryResponse = self.get_json(code, &url).await?;

        response
            .quote_summary
            .result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::CodeNotFound(code.to_string()))
    }

    /// Convert a chart payload into a raw price table.
    fn parse_price_table(&self, data: &ChartData) -> RawPriceTable {
        let timestamps = data.timestamp.clone().unwrap_or_default();
        let Some(quote) = data.indicators.as_ref().and_then(|i| i.quote.first()) else {
            return RawPriceTable::new();
        };

        let rows = timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let date = Utc.timestamp_opt(ts, 0).single()?.date_naive();
                Some(RawPriceRow {
                    date,
                    open: field(&quote.open, i),
                    high: field(&quote.high, i),
                    low: field(&quote.low, i),
                    close: field(&quote.close, i),
                    volume: field(&quote.volume, i),
                })
            })
            .collect();

        RawPriceTable { rows }
    }
}

/// Element `i` of an optional column, if reported.
fn field<T: Copy>(column: &Option<Vec<Option<T>>>, i: usize) -> Option<T> {
    column.as_ref().and_then(|v| v.get(i).copied().flatten())
}

/// Finite number out of an optional `{"raw": n, "fmt": ...}` wrapper.
fn num(value: &Option<Value>) -> Option<f64> {
    value.as_ref().and_then(lenient_f64)
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn description(&self) -> &str {
        "Yahoo Finance provider for prices, fundamentals and analyst data"
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooProvider {
    async fn fetch_history(&self, code: &StockCode, years: u32) -> Result<RawPriceTable> {
        if years == 0 {
            return Err(DataError::InvalidParameter(
                "history range must be at least one year".to_string(),
            ));
        }

        let data = self.fetch_chart(code, years, false).await?;
        let table = self.parse_price_table(&data);

        if table.is_empty() {
            return Err(DataError::DataNotAvailable {
                code: code.to_string(),
                detail: "empty price table".to_string(),
            });
        }

        Ok(table)
    }
}

#[async_trait]
impl FundamentalsProvider for YahooProvider {
    async fn fetch_statements(&self, code: &StockCode) -> Result<RawStatements> {
        let url = self.build_timeseries_url(code);
        let response: TimeseriesResponse = self.get_json(code, &url).await?;

        let mut statements = RawStatements::default();
        for result in response.timeseries.result {
            let Some(kind) = result.meta.kinds.first() else {
                continue;
            };
            let Some(label) = kind.strip_prefix("annual") else {
                continue;
            };
            let Some(table) = table_for(&mut statements, label) else {
                debug!(label, "skipping unrecognized timeseries item");
                continue;
            };

            let Some(rows) = result.series.get(kind.as_str()) else {
                continue;
            };
            let Some(rows) = rows.as_array() else {
                continue;
            };
            for row in rows.iter().filter(|r| !r.is_null()) {
                let Some(year) = row
                    .get("asOfDate")
                    .and_then(Value::as_str)
                    .and_then(|d| d.get(..4))
                    .and_then(|y| y.parse::<i32>().ok())
                else {
                    continue;
                };
                if let Some(value) = row.get("reportedValue").and_then(lenient_f64) {
                    table.insert(label, year, value);
                }
            }
        }

        Ok(statements)
    }

    async fn fetch_dividends(&self, code: &StockCode) -> Result<Vec<RawDividendEvent>> {
        let data = self.fetch_chart(code, DIVIDEND_YEARS, true).await?;

        let mut events: Vec<RawDividendEvent> = data
            .events
            .and_then(|e| e.dividends)
            .unwrap_or_default()
            .into_values()
            .filter_map(|event| {
                let ts = event.date?;
                let date = Utc.timestamp_opt(ts, 0).single()?.date_naive();
                Some(RawDividendEvent {
                    date,
                    amount: event.amount?,
                })
            })
            .collect();

        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    async fn fetch_profile(&self, code: &StockCode) -> Result<CompanyProfile> {
        let summary = self
            .fetch_summary(code, "assetProfile,price,summaryDetail")
            .await?;

        let profile = summary.asset_profile.unwrap_or_default();
        let price = summary.price.unwrap_or_default();

        Ok(CompanyProfile {
            name: price.short_name.or(price.long_name),
            exchange: price.exchange_name,
            currency: price.currency,
            sector: profile.sector,
            industry: profile.industry,
            website: profile.website,
            employees: profile.full_time_employees,
            market_cap: num(&price.market_cap),
            summary: profile.long_business_summary,
        })
    }
}

#[async_trait]
impl AnalystDataProvider for YahooProvider {
    async fn fetch_recommendations(&self, code: &StockCode) -> Result<Option<RawRecommendations>> {
        let summary = self
            .fetch_summary(code, "recommendationTrend,financialData")
            .await?;

        let financial = summary.financial_data.unwrap_or_default();
        // The current-period row is tagged "0m".
        let current = summary
            .recommendation_trend
            .and_then(|t| t.trend.into_iter().find(|row| row.period.as_deref() == Some("0m")));

        let raw = match current {
            Some(row) => RawRecommendations {
                period: row.period,
                strong_buy: row.strong_buy,
                buy: row.buy,
                hold: row.hold,
                sell: row.sell,
                strong_sell: row.strong_sell,
                recommendation_key: financial.recommendation_key,
                recommendation_mean: num(&financial.recommendation_mean),
            },
            None => RawRecommendations {
                recommendation_key: financial.recommendation_key,
                recommendation_mean: num(&financial.recommendation_mean),
                ..Default::default()
            },
        };

        if raw.is_empty() {
            debug!(code = %code, "no recommendation data");
            return Ok(None);
        }
        Ok(Some(raw))
    }

    async fn fetch_price_targets(&self, code: &StockCode) -> Result<Option<RawPriceTargets>> {
        let summary = self.fetch_summary(code, "financialData").await?;
        let financial = summary.financial_data.unwrap_or_default();

        let targets = RawPriceTargets {
            current: num(&financial.current_price),
            high: num(&financial.target_high_price),
            low: num(&financial.target_low_price),
            mean: num(&financial.target_mean_price),
            median: num(&financial.target_median_price),
        };

        if targets.is_empty() {
            debug!(code = %code, "no price-target data");
            return Ok(None);
        }
        Ok(Some(targets))
    }

    async fn fetch_earnings_dates(&self, code: &StockCode) -> Result<Vec<RawEarningsEvent>> {
        let summary = self
            .fetch_summary(code, "earningsHistory,calendarEvents")
            .await?;

        let mut events: Vec<RawEarningsEvent> = Vec::new();

        if let Some(history) = summary.earnings_history {
            for row in history.history {
                let Some(date) = row
                    .quarter
                    .as_ref()
                    .and_then(|q| q.get("fmt"))
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<NaiveDate>().ok())
                else {
                    continue;
                };
                events.push(RawEarningsEvent {
                    date,
                    eps_estimate: num(&row.eps_estimate),
                    eps_actual: num(&row.eps_actual),
                    // surprisePercent arrives as a fraction
                    surprise_pct: num(&row.surprise_percent).map(|p| p * 100.0),
                });
            }
        }

        if let Some(calendar) = summary.calendar_events {
            if let Some(earnings) = calendar.earnings {
                for value in earnings.earnings_date.unwrap_or_default() {
                    let Some(date) = earnings_date(&value) else {
                        continue;
                    };
                    events.push(RawEarningsEvent {
                        date,
                        eps_estimate: num(&earnings.earnings_average),
                        eps_actual: None,
                        surprise_pct: None,
                    });
                }
            }
        }

        if events.is_empty() {
            warn!(code = %code, "no earnings dates published");
        }
        Ok(events)
    }
}

/// The statement table a timeseries label belongs to, if recognized.
fn table_for<'a>(
    statements: &'a mut RawStatements,
    label: &str,
) -> Option<&'a mut RawStatementTable> {
    if INCOME_ITEMS.contains(&label) {
        Some(&mut statements.income)
    } else if BALANCE_ITEMS.contains(&label) {
        Some(&mut statements.balance)
    } else if CASH_FLOW_ITEMS.contains(&label) {
        Some(&mut statements.cash_flow)
    } else {
        None
    }
}

/// Date out of a calendarEvents earnings-date value, which arrives either as
/// an epoch wrapper or a bare epoch number.
fn earnings_date(value: &Value) -> Option<NaiveDate> {
    let ts = match value {
        Value::Number(n) => n.as_i64(),
        Value::Object(map) => map.get("raw").and_then(Value::as_i64),
        _ => None,
    }?;
    Some(Utc.timestamp_opt(ts, 0).single()?.date_naive())
}

// ============================================================================
// Yahoo Finance API Response Types
// ============================================================================

/// Chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    result: Vec<ChartData>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
    events: Option<ChartEvents>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Deserialize)]
struct QuoteColumns {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

#[derive(Debug, Deserialize)]
struct ChartEvents {
    dividends: Option<BTreeMap<String, ChartDividend>>,
}

#[derive(Debug, Deserialize)]
struct ChartDividend {
    amount: Option<f64>,
    date: Option<i64>,
}

/// Quote Summary API response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(default)]
    result: Vec<QuoteSummaryData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryData {
    asset_profile: Option<AssetProfile>,
    price: Option<PriceModule>,
    financial_data: Option<FinancialData>,
    recommendation_trend: Option<RecommendationTrend>,
    earnings_history: Option<EarningsHistory>,
    calendar_events: Option<CalendarEvents>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
    website: Option<String>,
    full_time_employees: Option<u64>,
    long_business_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    short_name: Option<String>,
    long_name: Option<String>,
    exchange_name: Option<String>,
    currency: Option<String>,
    market_cap: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<Value>,
    target_high_price: Option<Value>,
    target_low_price: Option<Value>,
    target_mean_price: Option<Value>,
    target_median_price: Option<Value>,
    recommendation_mean: Option<Value>,
    recommendation_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationTrend {
    #[serde(default)]
    trend: Vec<RecommendationRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationRow {
    period: Option<String>,
    strong_buy: Option<u32>,
    buy: Option<u32>,
    hold: Option<u32>,
    sell: Option<u32>,
    strong_sell: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct EarningsHistory {
    #[serde(default)]
    history: Vec<EarningsHistoryRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarningsHistoryRow {
    quarter: Option<Value>,
    eps_estimate: Option<Value>,
    eps_actual: Option<Value>,
    surprise_percent: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct CalendarEvents {
    earnings: Option<CalendarEarnings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarEarnings {
    earnings_date: Option<Vec<Value>>,
    earnings_average: Option<Value>,
}

/// Fundamentals timeseries API response.
#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesResult,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    #[serde(default)]
    result: Vec<TimeseriesEntry>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesEntry {
    meta: TimeseriesMeta,
    #[serde(flatten)]
    series: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesMeta {
    #[serde(rename = "type", default)]
    kinds: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_chart_url() {
        let provider = YahooProvider::new();
        let code = StockCode::new("7203");

        let url = provider.build_chart_url(&code, 1, false);
        assert!(url.contains("7203.T"));
        assert!(url.contains("interval=1d"));
        assert!(!url.contains("events=div"));

        let url = provider.build_chart_url(&code, DIVIDEND_YEARS, true);
        assert!(url.contains("events=div"));
    }

    #[test]
    fn test_build_timeseries_url_prefixes_annual() {
        let provider = YahooProvider::new();
        let url = provider.build_timeseries_url(&StockCode::new("7203"));

        assert!(url.contains("annualTotalRevenue"));
        assert!(url.contains("annualStockholdersEquity"));
        assert!(url.contains("annualOperatingCashFlow"));
    }

    #[test]
    fn test_provider_metadata() {
        let provider = YahooProvider::new();
        assert_eq!(provider.name(), "Yahoo Finance");
        assert!(!provider.description().is_empty());
    }

    #[test]
    fn test_parse_price_table_keeps_gaps() {
        let provider = YahooProvider::new();
        let data: ChartData = serde_json::from_value(json!({
            "timestamp": [1_704_153_600, 1_704_240_000],
            "indicators": {
                "quote": [{
                    "open": [100.0, null],
                    "high": [105.0, null],
                    "low": [99.0, null],
                    "close": [104.0, null],
                    "volume": [12_000, null]
                }]
            }
        }))
        .unwrap();

        let table = provider.parse_price_table(&data);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].close, Some(104.0));
        assert!(table.rows[1].close.is_none());
    }

    #[test]
    fn test_earnings_date_shapes() {
        assert!(earnings_date(&json!({"raw": 1_704_153_600})).is_some());
        assert!(earnings_date(&json!(1_704_153_600)).is_some());
        assert!(earnings_date(&json!("2024-01-02")).is_none());
    }
}
