//! Civil Zones AI CLI - Offline tooling for learned brains
//!
//! Works on the JSON brain files the controller exports:
//! - Summarizing tables, statistics and curriculum progress
//! - Pruning oversized tables
//! - Converting legacy bare-table files to bundled exports
//! - Dumping Q-values to CSV

use anyhow::Result;
use civil_zones_ai::cli::commands::{convert, dump, inspect, prune};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser)]
#[command(name = "civil_zones_ai")]
#[command(version, about = "Tooling for Civil Zones Q-learning brains", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a brain file
    Inspect(inspect::InspectArgs),

    /// Prune a brain file to a size ceiling
    Prune(prune::PruneArgs),

    /// Convert a brain file to the bundled export format
    Convert(convert::ConvertArgs),

    /// Dump Q-values as CSV
    Dump(dump::DumpArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect(args) => inspect::execute(args).await,
        Commands::Prune(args) => prune::execute(args).await,
        Commands::Convert(args) => convert::execute(args).await,
        Commands::Dump(args) => dump::execute(args).await,
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}
