//! Convert command - Upgrade a legacy bare-table brain to the bundled format

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::load_brain;
use crate::{
    cli::output::{print_kv, print_section},
    persistence::ExportDocument,
    stats::TrainingStats,
};

#[derive(Parser, Debug)]
#[command(about = "Rewrite a brain file as a bundled export")]
pub struct ConvertArgs {
    /// Path to the brain file
    pub brain: PathBuf,

    /// Directory for the converted export; defaults to the input's directory
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,
}

pub async fn execute(args: ConvertArgs) -> Result<()> {
    let brain = load_brain(&args.brain).await?;
    let legacy = brain.stats.is_none();

    let dir = match args.output_dir {
        Some(dir) => dir,
        None => args
            .brain
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let document = ExportDocument::new(brain.table, brain.stats.unwrap_or_else(TrainingStats::new));
    let written = document.write_into(&dir)?;

    print_section("Convert");
    print_kv("Source", &args.brain.display().to_string());
    print_kv(
        "Source format",
        if legacy { "legacy (table only)" } else { "bundled" },
    );
    print_kv("States", &document.q_table.state_count().to_string());
    print_kv("Written to", &written.display().to_string());
    Ok(())
}
