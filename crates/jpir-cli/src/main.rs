//! Command-line interface for the listed-company data pipeline.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Listed-company IR data pipeline", long_about = None)]
#[command(name = "jpir")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Harvest the company roster from the CMS and write roster.csv
    Roster,
    /// Fetch and normalize per-company price history documents
    History(BatchArgs),
    /// Fetch and derive per-company financial metrics documents
    Financials(BatchArgs),
    /// Fetch and derive per-company analyst consensus documents
    Analyst(BatchArgs),
}

/// Scope flags shared by the batch subcommands.
#[derive(Args, Debug, Default)]
struct BatchArgs {
    /// Limit the number of companies processed
    #[arg(long)]
    limit: Option<usize>,

    /// Skip the first N companies of the roster
    #[arg(long, default_value_t = 0)]
    skip: usize,

    /// Process a single security code instead of the roster
    #[arg(long)]
    ticker: Option<String>,

    /// Number of companies processed concurrently
    #[arg(long)]
    workers: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env();

    match cli.command {
        Commands::Roster => commands::roster(&config).await,
        Commands::History(args) => commands::history(&config, &args).await,
        Commands::Financials(args) => commands::financials(&config, &args).await,
        Commands::Analyst(args) => commands::analyst(&config, &args).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}
