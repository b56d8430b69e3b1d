//! Environment configuration for the CLI.

use std::env;
use std::path::PathBuf;

/// Runtime configuration, read once from the environment.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Base URL of the CMS, from `JPIR_CMS_URL`.
    pub(crate) cms_url: Option<String>,
    /// Artifact output root, from `JPIR_OUTPUT_DIR` (default `data`).
    pub(crate) output_dir: PathBuf,
}

impl Config {
    /// Reads the configuration from the environment.
    pub(crate) fn from_env() -> Self {
        let cms_url = env::var("JPIR_CMS_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_owned());
        let output_dir = env::var("JPIR_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        Self {
            cms_url,
            output_dir,
        }
    }

    /// Path of the roster CSV below the output root.
    pub(crate) fn roster_csv(&self) -> PathBuf {
        self.output_dir.join("roster.csv")
    }
}
