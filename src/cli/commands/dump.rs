//! Dump command - Write a brain's Q-values as CSV

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use super::load_brain;
use crate::export::{QTableCsvExporter, RegimeFilter};

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum RegimeArg {
    #[default]
    All,
    Wander,
    City,
}

impl From<RegimeArg> for RegimeFilter {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::All => RegimeFilter::All,
            RegimeArg::Wander => RegimeFilter::Wander,
            RegimeArg::City => RegimeFilter::City,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Write every stored Q-value as CSV rows")]
pub struct DumpArgs {
    /// Path to the brain file
    pub brain: PathBuf,

    /// Output CSV file; stdout when omitted
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Restrict rows to one regime
    #[arg(long, value_enum, default_value_t = RegimeArg::All)]
    pub regime: RegimeArg,
}

pub async fn execute(args: DumpArgs) -> Result<()> {
    let brain = load_brain(&args.brain).await?;
    let filter = RegimeFilter::from(args.regime);

    match args.output {
        Some(path) => {
            let rows = QTableCsvExporter::export(&brain.table, filter, &path)?;
            eprintln!("Wrote {rows} rows to {}", path.display());
        }
        None => {
            QTableCsvExporter::write(&brain.table, filter, io::stdout().lock())?;
        }
    }
    Ok(())
}
