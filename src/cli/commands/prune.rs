//! Prune command - Shrink an exported brain to a size ceiling

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{load_brain, load_config};
use crate::{
    cli::output::{format_number, print_section, print_stats_table},
    persistence::ExportDocument,
    stats::TrainingStats,
};

#[derive(Parser, Debug)]
#[command(about = "Drop the least valuable states from a brain file")]
pub struct PruneArgs {
    /// Path to the brain file
    pub brain: PathBuf,

    /// State-count ceiling; defaults to the configured table size
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Output file; defaults to a fresh export next to the input
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

pub async fn execute(args: PruneArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let max_size = args.max_size.unwrap_or(config.prune.max_table_size);
    let brain = load_brain(&args.brain).await?;

    let mut table = brain.table;
    let before = table.state_count();
    let removed = table.prune(max_size);

    let document = ExportDocument::new(table, brain.stats.unwrap_or_else(TrainingStats::new));
    let written = match args.output {
        Some(path) => {
            document.write_to(&path)?;
            path
        }
        None => {
            let dir = args
                .brain
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            document
                .write_into(&dir)
                .with_context(|| format!("Failed to write export into {}", dir.display()))?
        }
    };

    print_section("Prune");
    print_stats_table(&[
        ("Ceiling", format_number(max_size as u64)),
        ("States before", format_number(before as u64)),
        ("States removed", format_number(removed as u64)),
        (
            "States after",
            format_number(document.q_table.state_count() as u64),
        ),
        ("Written to", written.display().to_string()),
    ]);
    if removed == 0 {
        println!("\nTable is below 90% of the ceiling; nothing pruned.");
    }
    Ok(())
}
