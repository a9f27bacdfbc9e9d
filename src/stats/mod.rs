//! Episode statistics and death bookkeeping

pub mod deaths;
pub mod training;

pub use deaths::{DEFAULT_MAX_DEATH_RECORDS, DeathAnalysis, DeathLog, DeathRecord};
pub use training::{EpisodeSummary, RECENT_REWARDS_LEN, REWARD_HISTORY_LEN, TrainingStats};
