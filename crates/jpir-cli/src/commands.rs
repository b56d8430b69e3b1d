//! Subcommand handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use jpir_core::{RosterEntry, RosterProvider};
use jpir_pipeline::{CompanyOutcome, Harvester, RunSummary};
use jpir_roster::{CmsRoster, CsvRoster};
use jpir_store::DirStore;

use crate::BatchArgs;
use crate::config::Config;

/// Harvests the roster from the CMS and writes `roster.csv`.
pub(crate) async fn roster(config: &Config) -> Result<()> {
    let url = config
        .cms_url
        .as_deref()
        .context("JPIR_CMS_URL is not set")?;

    let roster = CmsRoster::new(url).fetch_roster().await?;
    let store = Arc::new(DirStore::new(&config.output_dir));
    Harvester::new(store).run_roster(&roster).await?;

    info!(companies = roster.len(), "roster written");
    Ok(())
}

/// Runs the price-history flow.
pub(crate) async fn history(config: &Config, args: &BatchArgs) -> Result<()> {
    let roster = load_roster(config, args).await?;
    let bar = progress_bar(roster.len())?;

    let summary = harvester(config, args)
        .run_history(&roster, |outcome| tick(&bar, outcome))
        .await?;

    finish(&bar, "history", &summary);
    Ok(())
}

/// Runs the financial-metrics flow.
pub(crate) async fn financials(config: &Config, args: &BatchArgs) -> Result<()> {
    let roster = load_roster(config, args).await?;
    let bar = progress_bar(roster.len())?;

    let summary = harvester(config, args)
        .run_metrics(&roster, |outcome| tick(&bar, outcome))
        .await?;

    finish(&bar, "financials", &summary);
    Ok(())
}

/// Runs the analyst-consensus flow.
pub(crate) async fn analyst(config: &Config, args: &BatchArgs) -> Result<()> {
    let roster = load_roster(config, args).await?;
    let bar = progress_bar(roster.len())?;

    let summary = harvester(config, args)
        .run_consensus(&roster, |outcome| tick(&bar, outcome))
        .await?;

    finish(&bar, "analyst", &summary);
    Ok(())
}

/// Builds the harvester for one run.
fn harvester(config: &Config, args: &BatchArgs) -> Harvester {
    let store = Arc::new(DirStore::new(&config.output_dir));
    let mut harvester = Harvester::new(store).with_yahoo();
    if let Some(workers) = args.workers {
        harvester = harvester.with_workers(workers);
    }
    harvester
}

/// Resolves the roster for a batch run.
///
/// `--ticker` short-circuits to a single company. Otherwise the local
/// `roster.csv` is preferred and the CMS listing is the fallback.
async fn load_roster(config: &Config, args: &BatchArgs) -> Result<Vec<RosterEntry>> {
    if let Some(ticker) = &args.ticker {
        return Ok(vec![RosterEntry::new(ticker.as_str(), "")]);
    }

    let csv_path = config.roster_csv();
    let roster = if csv_path.exists() {
        info!(path = %csv_path.display(), "using local roster");
        CsvRoster::new(&csv_path).fetch_roster().await?
    } else {
        let url = config
            .cms_url
            .as_deref()
            .context("no roster.csv found and JPIR_CMS_URL is not set")?;
        info!(url, "using CMS roster");
        CmsRoster::new(url).fetch_roster().await?
    };

    Ok(apply_range(roster, args.skip, args.limit))
}

/// Applies `--skip` and `--limit` to the roster.
fn apply_range(roster: Vec<RosterEntry>, skip: usize, limit: Option<usize>) -> Vec<RosterEntry> {
    let ranged = roster.into_iter().skip(skip);
    match limit {
        Some(limit) => ranged.take(limit).collect(),
        None => ranged.collect(),
    }
}

fn progress_bar(total: usize) -> Result<ProgressBar> {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(ProgressStyle::with_template(
        "[{pos}/{len}] {bar:40.cyan/blue} eta {eta}",
    )?);
    Ok(bar)
}

fn tick(bar: &ProgressBar, outcome: &CompanyOutcome) {
    bar.inc(1);
    if let Some(error) = &outcome.error {
        bar.println(format!("  failed {}: {error}", outcome.code));
    }
}

fn finish(bar: &ProgressBar, flow: &str, summary: &RunSummary) {
    bar.finish_and_clear();
    info!(
        flow,
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(n: usize) -> Vec<RosterEntry> {
        (0..n)
            .map(|i| RosterEntry::new(format!("{:04}", 1000 + i), format!("Company {i}")))
            .collect()
    }

    #[test]
    fn test_apply_range() {
        let sliced = apply_range(roster_of(10), 2, Some(3));
        assert_eq!(sliced.len(), 3);
        assert_eq!(sliced[0].code.as_str(), "1002");

        let tail = apply_range(roster_of(4), 3, None);
        assert_eq!(tail.len(), 1);

        let empty = apply_range(roster_of(2), 5, None);
        assert!(empty.is_empty());
    }
}
