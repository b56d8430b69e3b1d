#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/jpir/jpir/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Filesystem implementation of the [`ArtifactStore`] trait.
//!
//! Documents are written as pretty-printed JSON, one file per company and
//! artifact kind, keyed by security code. The layout below the output root:
//!
//! ```text
//! out/
//!   financials/{code}.json
//!   analyst/{code}.json
//!   history/{code}.json
//!   roster.csv
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jpir_core::{
    ArtifactStore, CompanyRecord, ConsensusRecord, DataError, PriceHistoryDocument, Result,
    RosterEntry, StockCode,
};
use serde::Serialize;
use tokio::fs;
use tracing::debug;

/// Directory for metrics documents.
const FINANCIALS_DIR: &str = "financials";

/// Directory for analyst-consensus documents.
const ANALYST_DIR: &str = "analyst";

/// Directory for price-history documents.
const HISTORY_DIR: &str = "history";

/// File name of the roster listing.
const ROSTER_FILE: &str = "roster.csv";

/// Artifact store writing JSON/CSV files below an output root.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Creates a store rooted at `root`. Directories are created on demand.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The output root this store writes below.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes one pretty-printed JSON document under `subdir`.
    async fn write_json<T: Serialize + Sync>(
        &self,
        subdir: &str,
        code: &str,
        value: &T,
    ) -> Result<()> {
        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| DataError::Store(format!("{}: {e}", dir.display())))?;

        let path = dir.join(format!("{code}.json"));
        let bytes =
            serde_json::to_vec_pretty(value).map_err(|e| DataError::Store(e.to_string()))?;
        fs::write(&path, bytes)
            .await
            .map_err(|e| DataError::Store(format!("{}: {e}", path.display())))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for DirStore {
    async fn put_metrics(&self, record: &CompanyRecord) -> Result<()> {
        self.write_json(FINANCIALS_DIR, &record.ticker, record).await
    }

    async fn put_consensus(&self, record: &ConsensusRecord) -> Result<()> {
        self.write_json(ANALYST_DIR, &record.ticker, record).await
    }

    async fn put_history(&self, code: &StockCode, doc: &PriceHistoryDocument) -> Result<()> {
        self.write_json(HISTORY_DIR, code.as_str(), doc).await
    }

    async fn put_roster(&self, roster: &[RosterEntry]) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DataError::Store(format!("{}: {e}", self.root.display())))?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["code", "name"])
            .map_err(|e| DataError::Store(e.to_string()))?;
        for entry in roster {
            writer
                .write_record([entry.code.as_str(), entry.name.as_str()])
                .map_err(|e| DataError::Store(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| DataError::Store(e.to_string()))?;

        let path = self.root.join(ROSTER_FILE);
        fs::write(&path, bytes)
            .await
            .map_err(|e| DataError::Store(format!("{}: {e}", path.display())))?;

        debug!("Wrote roster of {} companies to {}", roster.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("jpir-store-tests")
            .join(format!("{name}-{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    #[tokio::test]
    async fn test_metrics_document_roundtrip() {
        let store = DirStore::new(scratch("metrics"));
        let record = CompanyRecord::failure(&StockCode::new("7203"), "Empty response", Utc::now());

        store.put_metrics(&record).await.unwrap();

        let path = store.root().join("financials/7203.json");
        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["ticker_full"], "7203.T");
        // Absent values must be rendered as null, not omitted.
        assert!(json["company_info"].is_null());
        assert!(json["price_trend"]["ma_5"]["ma_value"].is_null());

        std::fs::remove_dir_all(store.root()).ok();
    }

    #[tokio::test]
    async fn test_history_document_path() {
        let store = DirStore::new(scratch("history"));
        let code = StockCode::new("9984");
        let doc = PriceHistoryDocument {
            code: code.as_str().to_owned(),
            ticker: code.ticker(),
            last_updated: Utc::now(),
            period_years: 5,
            data_points: 0,
            data: Vec::new(),
        };

        store.put_history(&code, &doc).await.unwrap();
        assert!(store.root().join("history/9984.json").exists());

        std::fs::remove_dir_all(store.root()).ok();
    }

    #[tokio::test]
    async fn test_roster_csv() {
        let store = DirStore::new(scratch("roster"));
        let roster = vec![
            RosterEntry::new("7203", "Toyota Motor"),
            RosterEntry::new("9984", "SoftBank Group"),
        ];

        store.put_roster(&roster).await.unwrap();

        let text = std::fs::read_to_string(store.root().join("roster.csv")).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("code,name"));
        assert_eq!(lines.next(), Some("7203,Toyota Motor"));
        assert_eq!(lines.next(), Some("9984,SoftBank Group"));

        std::fs::remove_dir_all(store.root()).ok();
    }
}
