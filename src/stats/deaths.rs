//! Bounded log of deaths and its aggregate analysis.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{identifiers::StateKey, outcome::DeathCause};

/// Default number of deaths retained.
pub const DEFAULT_MAX_DEATH_RECORDS: usize = 100;

/// One recorded death.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub cause: DeathCause,
    pub year: u32,
    pub population: u32,
    /// Encoded state the agent was in when it died.
    pub state: StateKey,
}

/// Aggregate view over a [`DeathLog`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeathAnalysis {
    pub total_deaths: usize,
    /// `None` for an empty log; count ties go to the cause seen first.
    pub most_common_cause: Option<DeathCause>,
    pub thirst_deaths: usize,
    pub starvation_deaths: usize,
    pub collapse_deaths: usize,
    pub unknown_deaths: usize,
    /// 0 for an empty log.
    pub avg_year_of_death: f64,
}

impl DeathAnalysis {
    pub fn count(&self, cause: DeathCause) -> usize {
        match cause {
            DeathCause::Thirst => self.thirst_deaths,
            DeathCause::Starvation => self.starvation_deaths,
            DeathCause::Collapse => self.collapse_deaths,
            DeathCause::Unknown => self.unknown_deaths,
        }
    }
}

/// Ring buffer of the most recent deaths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathLog {
    records: VecDeque<DeathRecord>,
    max_records: usize,
}

impl Default for DeathLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEATH_RECORDS)
    }
}

impl DeathLog {
    pub fn new(max_records: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_records.min(DEFAULT_MAX_DEATH_RECORDS)),
            max_records,
        }
    }

    /// Append a death, evicting the oldest once over capacity.
    pub fn record(&mut self, cause: DeathCause, year: u32, population: u32, state: StateKey) {
        self.records.push_back(DeathRecord {
            cause,
            year,
            population,
            state,
        });
        while self.records.len() > self.max_records {
            self.records.pop_front();
        }
    }

    pub fn analyze(&self) -> DeathAnalysis {
        let mut analysis = DeathAnalysis {
            total_deaths: self.records.len(),
            ..DeathAnalysis::default()
        };
        if self.records.is_empty() {
            return analysis;
        }

        // Causes in order of first appearance, so ties resolve to the earliest.
        let mut tallies: Vec<(DeathCause, usize)> = Vec::with_capacity(DeathCause::ALL.len());
        let mut year_sum = 0.0;
        for record in &self.records {
            year_sum += f64::from(record.year);
            match tallies.iter_mut().find(|(cause, _)| *cause == record.cause) {
                Some((_, count)) => *count += 1,
                None => tallies.push((record.cause, 1)),
            }
        }

        for &(cause, count) in &tallies {
            match cause {
                DeathCause::Thirst => analysis.thirst_deaths = count,
                DeathCause::Starvation => analysis.starvation_deaths = count,
                DeathCause::Collapse => analysis.collapse_deaths = count,
                DeathCause::Unknown => analysis.unknown_deaths = count,
            }
            match analysis.most_common_cause {
                Some(best) if count <= analysis.count(best) => {}
                _ => analysis.most_common_cause = Some(cause),
            }
        }

        analysis.avg_year_of_death = year_sum / self.records.len() as f64;
        analysis
    }

    pub fn records(&self) -> impl Iterator<Item = &DeathRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
