//! Record assembler.
//!
//! Composes the component outputs into the final per-company documents. The
//! assembler itself cannot fail: a missing payload degrades to an all-absent
//! sub-document, and fetch-layer failures are captured through the `failure`
//! constructors on the record types.

use chrono::{DateTime, Utc};
use tracing::debug;

use jpir_core::{
    CompanyProfile, CompanyRecord, ConsensusRecord, FinancialYear, Financials, PriceTrend,
    RawDividendEvent, RawEarningsEvent, RawPriceTable, RawPriceTargets, RawRecommendations,
    RawStatements, StockCode,
};

use crate::{consensus, dividends, normalize, ratios, statements, trend};

/// Raw payloads feeding one metrics document. Any of them may be absent.
#[derive(Debug, Default)]
pub struct MetricsPayloads {
    /// Company reference information.
    pub profile: Option<CompanyProfile>,
    /// Raw daily price table.
    pub prices: Option<RawPriceTable>,
    /// Raw annual statement tables.
    pub statements: Option<RawStatements>,
    /// Raw dividend event stream.
    pub dividends: Option<Vec<RawDividendEvent>>,
}

/// Raw payloads feeding one consensus document. Any of them may be absent.
#[derive(Debug, Default)]
pub struct ConsensusPayloads {
    /// Company display name.
    pub company_name: Option<String>,
    /// Raw recommendation counts and summary.
    pub recommendations: Option<RawRecommendations>,
    /// Raw price-target distribution.
    pub targets: Option<RawPriceTargets>,
    /// Raw earnings-calendar rows.
    pub earnings: Vec<RawEarningsEvent>,
}

/// Assembles the metrics document for one company.
///
/// `fetched_at` is the run's wall-clock timestamp, stamped by the caller so
/// the assembly stays deterministic.
#[must_use]
pub fn assemble_metrics(
    code: &StockCode,
    payloads: MetricsPayloads,
    fetched_at: DateTime<Utc>,
) -> CompanyRecord {
    let price_trend = match &payloads.prices {
        Some(table) => trend::classify(&normalize::normalize(table)),
        None => {
            debug!(code = %code, "no price table; trend left neutral");
            PriceTrend::default()
        }
    };

    let years: Vec<FinancialYear> = payloads
        .statements
        .as_ref()
        .map(|raw| {
            statements::align(raw)
                .into_iter()
                .map(|statement| FinancialYear {
                    ratios: ratios::derive(&statement),
                    statement,
                })
                .collect()
        })
        .unwrap_or_default();
    let financials = Financials {
        has_data: !years.is_empty(),
        years,
    };

    let dividends = payloads
        .dividends
        .as_deref()
        .map(dividends::aggregate)
        .unwrap_or_default();

    let company_name = payloads.profile.as_ref().and_then(|p| p.name.clone());

    CompanyRecord {
        success: true,
        fetched_at,
        ticker: code.as_str().to_owned(),
        ticker_full: code.ticker(),
        company_name,
        company_info: payloads.profile,
        price_trend,
        financials,
        dividends,
        error: None,
    }
}

/// Assembles the analyst-consensus document for one company.
#[must_use]
pub fn assemble_consensus(
    code: &StockCode,
    payloads: ConsensusPayloads,
    fetched_at: DateTime<Utc>,
) -> ConsensusRecord {
    ConsensusRecord {
        success: true,
        fetched_at,
        ticker: code.as_str().to_owned(),
        ticker_full: code.ticker(),
        company_name: payloads.company_name,
        analyst_recommendations: consensus::summarize_recommendations(
            payloads.recommendations.as_ref(),
        ),
        target_prices: consensus::summarize_targets(payloads.targets.as_ref()),
        earnings_dates: consensus::partition_earnings(&payloads.earnings, fetched_at),
        error: None,
    }
}
