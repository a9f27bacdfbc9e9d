//! Full-session checkpoints.

use serde::{Deserialize, Serialize};

use crate::{q_learning::QTable, stats::{DeathLog, TrainingStats}};

/// Everything a training session learns, in one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub table: QTable,
    pub stats: TrainingStats,
    pub deaths: DeathLog,
}

impl SessionSnapshot {
    pub const VERSION: u32 = 1;

    pub fn new(table: QTable, stats: TrainingStats, deaths: DeathLog) -> Self {
        Self {
            version: Self::VERSION,
            table,
            stats,
            deaths,
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::new(QTable::new(), TrainingStats::new(), DeathLog::default())
    }
}
