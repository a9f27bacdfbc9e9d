//! Configuration for a training session.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    curriculum::CurriculumConfig,
    encoding::EncodingConfig,
    error::Error,
    q_learning::LearningParams,
    reward::RewardWeights,
    stats::DEFAULT_MAX_DEATH_RECORDS,
};

/// Key under which the Q-table is stored in a key-value medium.
pub const DEFAULT_STORAGE_KEY: &str = "civil_zones_qtable";

/// When and how hard the Q-table is pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// State count the table is kept under.
    pub max_table_size: usize,
    /// Updates between prune checks; 0 disables automatic pruning.
    pub interval: usize,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            max_table_size: 10_000,
            interval: 500,
        }
    }
}

/// Everything a [`crate::session::TrainingSession`] needs to run.
///
/// Values are taken as given; nothing is range-checked.
///
/// # Examples
///
/// ```
/// use civil_zones_ai::config::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_seed(42)
///     .with_learning_rate(0.2)
///     .with_max_table_size(5_000);
/// assert_eq!(config.storage_key, "civil_zones_qtable");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub learning: LearningParams,
    pub curriculum: CurriculumConfig,
    pub rewards: RewardWeights,
    pub encoding: EncodingConfig,
    pub prune: PruneConfig,
    pub storage_key: String,
    pub max_death_records: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            learning: LearningParams::default(),
            curriculum: CurriculumConfig::default(),
            rewards: RewardWeights::default(),
            encoding: EncodingConfig::default(),
            prune: PruneConfig::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_death_records: DEFAULT_MAX_DEATH_RECORDS,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {path:?}"),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.learning.discount_factor = discount_factor;
        self
    }

    pub fn with_curriculum(mut self, curriculum: CurriculumConfig) -> Self {
        self.curriculum = curriculum;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardWeights) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_max_table_size(mut self, max_table_size: usize) -> Self {
        self.prune.max_table_size = max_table_size;
        self
    }

    pub fn with_prune_interval(mut self, interval: usize) -> Self {
        self.prune.interval = interval;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
