//! Artifact store trait for persisting assembled documents.
//!
//! This module defines the [`ArtifactStore`] trait implemented by the
//! persistence crate. Implementations write the per-company JSON documents
//! and the roster listing to a backing location.

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{CompanyRecord, ConsensusRecord, PriceHistoryDocument, RosterEntry, StockCode},
};

/// Trait for persisting the assembled output documents.
///
/// Writes are keyed by security code and overwrite the previous run's
/// artifact of the same kind.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persists a per-company metrics document.
    async fn put_metrics(&self, record: &CompanyRecord) -> Result<()>;

    /// Persists a per-company analyst-consensus document.
    async fn put_consensus(&self, record: &ConsensusRecord) -> Result<()>;

    /// Persists a per-company price-history document.
    async fn put_history(&self, code: &StockCode, doc: &PriceHistoryDocument) -> Result<()>;

    /// Persists the roster listing.
    async fn put_roster(&self, roster: &[RosterEntry]) -> Result<()>;
}
