//! Harvester: per-company batch runs over the configured providers.

use std::sync::Arc;

use chrono::Utc;
use futures::{StreamExt, stream};
use tracing::{debug, warn};

use jpir_core::{
    AnalystDataProvider, ArtifactStore, CompanyRecord, ConsensusRecord, DataError,
    FundamentalsProvider, PriceHistoryDocument, PriceHistoryProvider, Result, RosterEntry,
    StockCode,
};
use jpir_metrics::{ConsensusPayloads, MetricsPayloads, assemble_consensus, assemble_metrics};

/// Default number of companies processed concurrently.
const DEFAULT_WORKERS: usize = 3;

/// Calendar years of prices fetched for the trend classifier.
const TREND_YEARS: u32 = 1;

/// Calendar years of prices fetched for the history artifact.
const HISTORY_YEARS: u32 = 5;

/// Outcome of processing one company.
#[derive(Debug, Clone)]
pub struct CompanyOutcome {
    /// The company's security code.
    pub code: StockCode,
    /// Whether the company produced a `success=true` document.
    pub success: bool,
    /// The captured error description, if any.
    pub error: Option<String>,
}

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Companies requested.
    pub total: usize,
    /// Companies that produced a `success=true` document.
    pub succeeded: usize,
    /// Companies that produced a failure document.
    pub failed: usize,
}

impl RunSummary {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: &CompanyOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Batch driver wiring providers, derivation engine and artifact store.
///
/// # Example
///
/// ```rust,ignore
/// use jpir_pipeline::Harvester;
/// use jpir_store::DirStore;
/// use std::sync::Arc;
///
/// let harvester = Harvester::new(Arc::new(DirStore::new("out"))).with_yahoo();
/// let summary = harvester.run_metrics(&roster, |_| {}).await?;
/// println!("{}/{} succeeded", summary.succeeded, summary.total);
/// ```
pub struct Harvester {
    price: Option<Arc<dyn PriceHistoryProvider>>,
    fundamentals: Option<Arc<dyn FundamentalsProvider>>,
    analyst: Option<Arc<dyn AnalystDataProvider>>,
    store: Arc<dyn ArtifactStore>,
    workers: usize,
}

impl std::fmt::Debug for Harvester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harvester")
            .field("price", &self.price.as_ref().map(|p| p.name()))
            .field("fundamentals", &self.fundamentals.as_ref().map(|p| p.name()))
            .field("analyst", &self.analyst.as_ref().map(|p| p.name()))
            .field("workers", &self.workers)
            .finish()
    }
}

impl Harvester {
    /// Creates a harvester writing to `store`, with no providers configured.
    #[must_use]
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            price: None,
            fundamentals: None,
            analyst: None,
            store,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Sets the number of companies processed concurrently.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Registers a price-history provider.
    #[must_use]
    pub fn with_price_provider(mut self, provider: Arc<dyn PriceHistoryProvider>) -> Self {
        debug!(provider = provider.name(), "Registering price provider");
        self.price = Some(provider);
        self
    }

    /// Registers a fundamentals provider.
    #[must_use]
    pub fn with_fundamentals_provider(mut self, provider: Arc<dyn FundamentalsProvider>) -> Self {
        debug!(provider = provider.name(), "Registering fundamentals provider");
        self.fundamentals = Some(provider);
        self
    }

    /// Registers an analyst-data provider.
    #[must_use]
    pub fn with_analyst_provider(mut self, provider: Arc<dyn AnalystDataProvider>) -> Self {
        debug!(provider = provider.name(), "Registering analyst provider");
        self.analyst = Some(provider);
        self
    }

    /// Registers Yahoo Finance for all three market-data roles.
    #[cfg(feature = "yahoo")]
    #[must_use]
    pub fn with_yahoo(self) -> Self {
        let provider = Arc::new(jpir_yahoo::YahooProvider::new());
        self.with_price_provider(provider.clone())
            .with_fundamentals_provider(provider.clone())
            .with_analyst_provider(provider)
    }

    /// Runs the metrics flow for every roster entry, invoking `progress`
    /// after each company completes.
    ///
    /// # Errors
    ///
    /// Fails only when no fundamentals provider is configured; per-company
    /// failures are captured in the written documents and the summary.
    pub async fn run_metrics<F>(&self, roster: &[RosterEntry], mut progress: F) -> Result<RunSummary>
    where
        F: FnMut(&CompanyOutcome),
    {
        if self.fundamentals.is_none() {
            return Err(DataError::ProviderNotConfigured(
                "No fundamentals provider registered".to_string(),
            ));
        }

        let mut outcomes = stream::iter(roster.iter().map(|entry| self.metrics_for(entry)))
            .buffer_unordered(self.workers);

        let mut summary = RunSummary::new(roster.len());
        while let Some(outcome) = outcomes.next().await {
            summary.record(&outcome);
            progress(&outcome);
        }
        Ok(summary)
    }

    /// Runs the analyst-consensus flow for every roster entry.
    ///
    /// # Errors
    ///
    /// Fails only when no analyst provider is configured.
    pub async fn run_consensus<F>(
        &self,
        roster: &[RosterEntry],
        mut progress: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&CompanyOutcome),
    {
        if self.analyst.is_none() {
            return Err(DataError::ProviderNotConfigured(
                "No analyst provider registered".to_string(),
            ));
        }

        let mut outcomes = stream::iter(roster.iter().map(|entry| self.consensus_for(entry)))
            .buffer_unordered(self.workers);

        let mut summary = RunSummary::new(roster.len());
        while let Some(outcome) = outcomes.next().await {
            summary.record(&outcome);
            progress(&outcome);
        }
        Ok(summary)
    }

    /// Runs the price-history flow for every roster entry.
    ///
    /// # Errors
    ///
    /// Fails only when no price provider is configured.
    pub async fn run_history<F>(&self, roster: &[RosterEntry], mut progress: F) -> Result<RunSummary>
    where
        F: FnMut(&CompanyOutcome),
    {
        if self.price.is_none() {
            return Err(DataError::ProviderNotConfigured(
                "No price provider registered".to_string(),
            ));
        }

        let mut outcomes = stream::iter(roster.iter().map(|entry| self.history_for(entry)))
            .buffer_unordered(self.workers);

        let mut summary = RunSummary::new(roster.len());
        while let Some(outcome) = outcomes.next().await {
            summary.record(&outcome);
            progress(&outcome);
        }
        Ok(summary)
    }

    /// Persists the roster listing itself.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn run_roster(&self, roster: &[RosterEntry]) -> Result<()> {
        self.store.put_roster(roster).await
    }

    /// Processes the metrics flow for one company.
    async fn metrics_for(&self, entry: &RosterEntry) -> CompanyOutcome {
        let code = entry.code.clone();
        let fetched_at = Utc::now();

        let mut record = match self.metrics_payloads(&code).await {
            Ok(payloads) => assemble_metrics(&code, payloads, fetched_at),
            Err(e) => {
                warn!(code = %code, error = %e, "metrics fetch failed");
                CompanyRecord::failure(&code, e.to_string(), fetched_at)
            }
        };
        if record.company_name.is_none() && !entry.name.is_empty() {
            record.company_name = Some(entry.name.clone());
        }

        let mut outcome = CompanyOutcome {
            code,
            success: record.success,
            error: record.error.clone(),
        };
        if let Err(e) = self.store.put_metrics(&record).await {
            warn!(code = %outcome.code, error = %e, "metrics write failed");
            outcome.success = false;
            outcome.error = Some(e.to_string());
        }
        outcome
    }

    /// Processes the consensus flow for one company.
    async fn consensus_for(&self, entry: &RosterEntry) -> CompanyOutcome {
        let code = entry.code.clone();
        let fetched_at = Utc::now();

        let mut record = match self.consensus_payloads(&code).await {
            Ok(payloads) => assemble_consensus(&code, payloads, fetched_at),
            Err(e) => {
                warn!(code = %code, error = %e, "consensus fetch failed");
                ConsensusRecord::failure(&code, e.to_string(), fetched_at)
            }
        };
        if record.company_name.is_none() && !entry.name.is_empty() {
            record.company_name = Some(entry.name.clone());
        }

        let mut outcome = CompanyOutcome {
            code,
            success: record.success,
            error: record.error.clone(),
        };
        if let Err(e) = self.store.put_consensus(&record).await {
            warn!(code = %outcome.code, error = %e, "consensus write failed");
            outcome.success = false;
            outcome.error = Some(e.to_string());
        }
        outcome
    }

    /// Processes the price-history flow for one company.
    async fn history_for(&self, entry: &RosterEntry) -> CompanyOutcome {
        let code = entry.code.clone();
        let Some(price) = &self.price else {
            return CompanyOutcome {
                code,
                success: false,
                error: Some("No price provider registered".to_string()),
            };
        };

        let result = price.fetch_history(&code, HISTORY_YEARS).await;
        match result {
            Ok(table) => {
                let data = jpir_metrics::normalize(&table);
                let doc = PriceHistoryDocument {
                    code: code.as_str().to_owned(),
                    ticker: code.ticker(),
                    last_updated: Utc::now(),
                    period_years: HISTORY_YEARS,
                    data_points: data.len(),
                    data,
                };
                match self.store.put_history(&code, &doc).await {
                    Ok(()) => CompanyOutcome {
                        code,
                        success: true,
                        error: None,
                    },
                    Err(e) => {
                        warn!(code = %code, error = %e, "history write failed");
                        CompanyOutcome {
                            code,
                            success: false,
                            error: Some(e.to_string()),
                        }
                    }
                }
            }
            Err(e) => {
                warn!(code = %code, error = %e, "history fetch failed");
                CompanyOutcome {
                    code,
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Fetches the raw payloads feeding one metrics document.
    async fn metrics_payloads(&self, code: &StockCode) -> Result<MetricsPayloads> {
        let Some(fundamentals) = &self.fundamentals else {
            return Err(DataError::ProviderNotConfigured(
                "No fundamentals provider registered".to_string(),
            ));
        };

        let (profile, statements, dividends) = tokio::join!(
            fundamentals.fetch_profile(code),
            fundamentals.fetch_statements(code),
            fundamentals.fetch_dividends(code),
        );

        let prices = match &self.price {
            Some(provider) => optional(provider.fetch_history(code, TREND_YEARS).await)?,
            None => None,
        };

        Ok(MetricsPayloads {
            profile: optional(profile)?,
            prices,
            statements: optional(statements)?,
            dividends: optional(dividends)?,
        })
    }

    /// Fetches the raw payloads feeding one consensus document.
    async fn consensus_payloads(&self, code: &StockCode) -> Result<ConsensusPayloads> {
        let Some(analyst) = &self.analyst else {
            return Err(DataError::ProviderNotConfigured(
                "No analyst provider registered".to_string(),
            ));
        };

        let (recommendations, targets, earnings) = tokio::join!(
            analyst.fetch_recommendations(code),
            analyst.fetch_price_targets(code),
            analyst.fetch_earnings_dates(code),
        );

        // The display name rides along when a fundamentals provider is
        // configured; its absence never fails the company.
        let company_name = match &self.fundamentals {
            Some(provider) => match provider.fetch_profile(code).await {
                Ok(profile) => profile.name,
                Err(e) => {
                    debug!(code = %code, error = %e, "profile lookup failed");
                    None
                }
            },
            None => None,
        };

        Ok(ConsensusPayloads {
            company_name,
            recommendations: recommendations?,
            targets: targets?,
            earnings: earnings?,
        })
    }
}

/// Maps a provider's "no data for this company" answer to an absent payload,
/// keeping everything else an error.
fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DataError::DataNotAvailable { code, detail }) => {
            debug!(code = %code, detail = %detail, "payload absent");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
