//! Provider traits for fetching raw company data.
//!
//! This module defines the provider traits:
//!
//! - [`MarketDataProvider`] - Base trait for all market-data providers
//! - [`PriceHistoryProvider`] - Raw daily price tables
//! - [`FundamentalsProvider`] - Statements, dividends and company profiles
//! - [`AnalystDataProvider`] - Recommendations, price targets and earnings dates
//! - [`RosterProvider`] - The company roster

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    raw::{
        RawDividendEvent, RawEarningsEvent, RawPriceTable, RawPriceTargets, RawRecommendations,
        RawStatements,
    },
    types::{CompanyProfile, RosterEntry, StockCode},
};

/// Base trait for all market-data providers.
pub trait MarketDataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Yahoo Finance").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Provider for daily price history.
#[async_trait]
pub trait PriceHistoryProvider: MarketDataProvider {
    /// Fetches up to `years` calendar years of daily prices for `code`.
    ///
    /// The returned table is raw: not necessarily ordered, possibly gapped,
    /// and individual fields may be missing.
    async fn fetch_history(&self, code: &StockCode, years: u32) -> Result<RawPriceTable>;
}

/// Provider for statement, dividend and company reference data.
#[async_trait]
pub trait FundamentalsProvider: MarketDataProvider {
    /// Fetches the raw annual statement tables for `code`.
    async fn fetch_statements(&self, code: &StockCode) -> Result<RawStatements>;

    /// Fetches the raw dividend event stream for `code`.
    async fn fetch_dividends(&self, code: &StockCode) -> Result<Vec<RawDividendEvent>>;

    /// Fetches company reference information for `code`.
    async fn fetch_profile(&self, code: &StockCode) -> Result<CompanyProfile>;
}

/// Provider for analyst recommendation, price-target and earnings data.
///
/// Each payload may be wholly absent for thinly-covered securities, and the
/// absence of one must not block the others, so the fetchers return
/// `Ok(None)` or an empty list instead of an error in that case.
#[async_trait]
pub trait AnalystDataProvider: MarketDataProvider {
    /// Fetches recommendation counts and summary for `code`.
    async fn fetch_recommendations(&self, code: &StockCode) -> Result<Option<RawRecommendations>>;

    /// Fetches the price-target distribution for `code`.
    async fn fetch_price_targets(&self, code: &StockCode) -> Result<Option<RawPriceTargets>>;

    /// Fetches the earnings-calendar rows for `code`, past and future mixed.
    async fn fetch_earnings_dates(&self, code: &StockCode) -> Result<Vec<RawEarningsEvent>>;
}

/// Provider for the company roster.
#[async_trait]
pub trait RosterProvider: Send + Sync + Debug {
    /// Fetches the full roster of (code, name) pairs.
    async fn fetch_roster(&self) -> Result<Vec<RosterEntry>>;
}
