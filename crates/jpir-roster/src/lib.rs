#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/jpir/jpir/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company roster sources.
//!
//! The pipeline needs a set of (code, name) pairs to drive a run. The
//! primary source is the CMS listing ([`CmsRoster`]); a local CSV file
//! ([`CsvRoster`]) serves as the offline fallback, matching the artifact
//! written by the `roster` subcommand.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use jpir_core::{DataError, Result, RosterEntry, RosterProvider, StockCode};
use serde::Deserialize;
use tracing::{debug, warn};

/// Companies requested per CMS page.
const PAGE_SIZE: usize = 100;

/// Safety stop for CMS pagination.
const MAX_PAGES: usize = 50;

/// Roster source backed by the content-management REST API.
///
/// Pages through the published company listing and keeps entries whose
/// security code is a 4-character alphanumeric string.
#[derive(Debug)]
pub struct CmsRoster {
    client: reqwest::Client,
    base_url: String,
}

impl CmsRoster {
    /// Creates a roster source for the CMS at `base_url` (no trailing slash).
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Creates a roster source with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// URL of one listing page.
    fn page_url(&self, offset: usize) -> String {
        format!(
            "{}/wp-json/wp/v2/company?per_page={PAGE_SIZE}&offset={offset}&_fields=id,title,stock_code&status=publish",
            self.base_url
        )
    }

    /// Fetches one listing page.
    async fn fetch_page(&self, offset: usize) -> Result<Vec<CmsCompany>> {
        let url = self.page_url(offset);
        debug!("Roster request: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        // The CMS answers 400 for an offset past the end of the listing.
        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            return Err(DataError::Network(format!(
                "HTTP {} from CMS listing",
                response.status()
            )));
        }

        response
            .json::<Vec<CmsCompany>>()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RosterProvider for CmsRoster {
    async fn fetch_roster(&self) -> Result<Vec<RosterEntry>> {
        let mut roster = Vec::new();

        for page in 0..MAX_PAGES {
            let companies = self.fetch_page(page * PAGE_SIZE).await?;
            let page_len = companies.len();

            for company in companies {
                let Some(code) = company.stock_code.filter(|c| is_valid_code(c)) else {
                    continue;
                };
                let name = company
                    .title
                    .and_then(|t| t.rendered)
                    .unwrap_or_default();
                roster.push(RosterEntry::new(StockCode::new(code), name));
            }

            if page_len < PAGE_SIZE {
                break;
            }
            if page + 1 == MAX_PAGES {
                warn!("Roster pagination hit the {MAX_PAGES}-page safety stop");
            }
        }

        debug!("Fetched roster of {} companies", roster.len());
        Ok(roster)
    }
}

/// Roster source backed by a local `code,name` CSV file.
#[derive(Debug)]
pub struct CsvRoster {
    path: PathBuf,
}

impl CsvRoster {
    /// Creates a roster source reading from `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl RosterProvider for CsvRoster {
    async fn fetch_roster(&self) -> Result<Vec<RosterEntry>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| DataError::Other(format!("{}: {e}", self.path.display())))?;

        let mut roster = Vec::new();
        for record in reader.deserialize() {
            let row: CsvRow = record.map_err(|e| DataError::Parse(e.to_string()))?;
            if !is_valid_code(&row.code) {
                warn!(code = %row.code, "skipping roster row with invalid code");
                continue;
            }
            roster.push(RosterEntry::new(StockCode::new(row.code), row.name));
        }

        debug!("Read roster of {} companies from {}", roster.len(), self.path.display());
        Ok(roster)
    }
}

/// A valid security code is 4 alphanumeric characters.
fn is_valid_code(code: &str) -> bool {
    code.len() == 4 && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// One company row from the CMS listing.
#[derive(Debug, Deserialize)]
struct CmsCompany {
    stock_code: Option<String>,
    title: Option<CmsTitle>,
}

#[derive(Debug, Deserialize)]
struct CmsTitle {
    rendered: Option<String>,
}

/// One row of the roster CSV.
#[derive(Debug, Deserialize)]
struct CsvRow {
    code: String,
    #[serde(default)]
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_validity() {
        assert!(is_valid_code("7203"));
        assert!(is_valid_code("285A"));
        assert!(!is_valid_code("720"));
        assert!(!is_valid_code("72030"));
        assert!(!is_valid_code("72.3"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn test_page_url() {
        let roster = CmsRoster::new("https://cms.example.com");
        let url = roster.page_url(200);

        assert!(url.starts_with("https://cms.example.com/wp-json/wp/v2/company"));
        assert!(url.contains("per_page=100"));
        assert!(url.contains("offset=200"));
        assert!(url.contains("status=publish"));
    }

    #[tokio::test]
    async fn test_csv_roster_roundtrip() {
        let dir = std::env::temp_dir().join("jpir-roster-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roster.csv");
        std::fs::write(&path, "code,name\n7203,Toyota Motor\n9984,SoftBank Group\nbad,Oops\n")
            .unwrap();

        let roster = CsvRoster::new(&path).fetch_roster().await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].code.as_str(), "7203");
        assert_eq!(roster[0].name, "Toyota Motor");

        std::fs::remove_file(&path).ok();
    }
}
