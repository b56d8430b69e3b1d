#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/jpir/jpir/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the company data pipeline.
//!
//! This crate provides the foundational abstractions shared by the pipeline:
//!
//! - [`PriceHistoryProvider`](provider::PriceHistoryProvider) - Raw daily price tables
//! - [`FundamentalsProvider`](provider::FundamentalsProvider) - Statements, dividends, profiles
//! - [`AnalystDataProvider`](provider::AnalystDataProvider) - Analyst payloads
//! - [`RosterProvider`](provider::RosterProvider) - The company roster
//! - [`ArtifactStore`](store::ArtifactStore) - Persistence abstraction
//!
//! plus the canonical data model in [`types`] and the raw payload model in
//! [`raw`].

/// Error types for fetch and store operations.
pub mod error;
/// Provider traits for fetching raw company data.
pub mod provider;
/// Raw provider payload model.
pub mod raw;
/// Artifact store trait for persisting assembled documents.
pub mod store;
/// Core data types (StockCode, PricePoint, output documents, ...).
pub mod types;
/// Moving-average window definitions.
pub mod window;

// Re-export commonly used items at crate root
pub use error::{DataError, Result};
pub use provider::{
    AnalystDataProvider, FundamentalsProvider, MarketDataProvider, PriceHistoryProvider,
    RosterProvider,
};
pub use raw::{
    RawDividendEvent, RawEarningsEvent, RawPriceRow, RawPriceTable, RawPriceTargets,
    RawRecommendations, RawStatementTable, RawStatements, lenient_f64,
};
pub use store::ArtifactStore;
pub use types::{
    CompanyProfile, CompanyRecord, ConsensusRecord, DerivedRatios, DividendHistory, DividendYear,
    EarningsCalendar, EarningsEntry, FinancialYear, Financials, MovingAverage, PriceHistoryDocument,
    PricePoint, PriceTrend, RecommendationSummary, RosterEntry, StatementYear, StockCode,
    TargetPriceSummary, Trend,
};
pub use window::MaWindow;
