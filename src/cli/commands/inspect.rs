//! Inspect command - Summarize an exported brain

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{load_brain, load_config};
use crate::{
    cli::output::{
        format_number, format_rate, format_reward, print_kv, print_section, print_stats_table,
        print_subsection,
    },
    session::TrainingSession,
};

#[derive(Parser, Debug)]
#[command(about = "Summarize an exported brain file")]
pub struct InspectArgs {
    /// Path to the brain file (bundled export or legacy bare table)
    pub brain: PathBuf,

    /// Session config used to derive the curriculum phase
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of highest-valued states to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub async fn execute(args: InspectArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let brain = load_brain(&args.brain).await?;
    let legacy = brain.stats.is_none();

    let mut session = TrainingSession::new(config);
    session.apply_import(brain);
    let table = session.table();
    let stats = session.stats();

    print_section(&format!("Brain: {}", args.brain.display()));
    print_kv("Format", if legacy { "legacy (table only)" } else { "bundled" });

    print_subsection("Q-table");
    print_stats_table(&[
        ("States", format_number(table.state_count() as u64)),
        ("State-action values", format_number(table.size() as u64)),
        (
            "Wander states",
            format_number(count_prefixed(&session, "W|") as u64),
        ),
        (
            "City states",
            format_number(count_prefixed(&session, "C|") as u64),
        ),
    ]);

    if !legacy {
        print_subsection("Training statistics");
        print_stats_table(&[
            ("Episodes", format_number(stats.episodes)),
            ("Total reward", format!("{:.2}", stats.total_reward)),
            ("Average reward (100)", format!("{:.2}", stats.average_reward())),
            (
                "Average reward (20)",
                format!("{:.2}", stats.recent_average_reward()),
            ),
            ("Best reward", format_reward(stats.best_reward)),
            ("Best population", stats.best_population.to_string()),
            ("Best survival (years)", stats.best_survival_years.to_string()),
            ("Cities built", format_number(stats.cities_built)),
            ("Balanced cities", format_number(stats.balanced_cities)),
            ("Smart settlements", format_number(stats.smart_settlements)),
        ]);
    }

    print_subsection("Curriculum");
    print_stats_table(&[
        ("Phase", session.phase().to_string()),
        ("Exploration rate", format_rate(session.exploration_rate())),
    ]);

    if args.top > 0 && !table.is_empty() {
        print_subsection(&format!("Top {} states", args.top));
        let mut ranked: Vec<(f64, String)> = table
            .states()
            .filter_map(|state| table.state_value(state).map(|v| (v, state.to_string())))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        for (value, state) in ranked.into_iter().take(args.top) {
            println!("  {value:>10.3}  {state}");
        }
    }

    Ok(())
}

fn count_prefixed(session: &TrainingSession, prefix: &str) -> usize {
    session
        .table()
        .states()
        .filter(|state| state.as_str().starts_with(prefix))
        .count()
}
