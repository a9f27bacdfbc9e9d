//! Training session
//!
//! A [`TrainingSession`] owns everything one learner accumulates: the
//! Q-table, episode statistics and death log, plus the RNG and the
//! exploration rate derived from curriculum progress. The game loop drives
//! it once per tick:
//!
//! 1. encode the observation ([`TrainingSession::encode_city`] /
//!    [`TrainingSession::encode_wander`])
//! 2. pick an action with [`TrainingSession::choose`]
//! 3. apply it, then report the outcome through [`TrainingSession::learn`]
//!
//! Sessions are plain owned values, so independent runs never share state.

use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    Result,
    actions::Action,
    config::SessionConfig,
    curriculum::Phase,
    encoding::{CityEncoder, CityObservation, WanderEncoder, WanderObservation},
    error::Error,
    identifiers::StateKey,
    outcome::{DeathCause, TransitionOutcome},
    persistence::{ExportDocument, ImportedBrain, SessionSnapshot, load_table, save_table},
    ports::{KeyValueStore, SnapshotRepository},
    q_learning::{QTable, policy},
    stats::{DeathAnalysis, DeathLog, EpisodeSummary, TrainingStats},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Single-learner training context.
#[derive(Debug, Clone)]
pub struct TrainingSession {
    config: SessionConfig,
    table: QTable,
    stats: TrainingStats,
    deaths: DeathLog,
    wander_encoder: WanderEncoder,
    city_encoder: CityEncoder,
    rng: StdRng,
    training: bool,
    exploration_rate: f64,
    states_explored: u64,
    episode_reward: f64,
    updates_since_prune: usize,
}

impl TrainingSession {
    /// Create a session with an empty table, in training mode.
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Self {
            table: QTable::new(),
            stats: TrainingStats::new(),
            deaths: DeathLog::new(config.max_death_records),
            wander_encoder: WanderEncoder::new(config.encoding.wander),
            city_encoder: CityEncoder::new(config.encoding.city),
            rng: build_rng(config.seed),
            training: true,
            exploration_rate: 0.0,
            states_explored: 0,
            episode_reward: 0.0,
            updates_since_prune: 0,
            config,
        };
        session.refresh_exploration_rate();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn deaths(&self) -> &DeathLog {
        &self.deaths
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Switch learning on or off.
    ///
    /// With training off the session only exploits: [`Self::choose`] never
    /// explores and [`Self::learn`] leaves the table untouched.
    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    pub fn encode_wander(&self, observation: &WanderObservation) -> StateKey {
        self.wander_encoder.encode(observation)
    }

    pub fn encode_city(&self, observation: &CityObservation) -> StateKey {
        self.city_encoder.encode(observation)
    }

    /// Pick one of `available` for `state`.
    ///
    /// Returns `None` only if `available` is empty.
    pub fn choose<A: Action>(&mut self, state: &StateKey, available: &[A]) -> Option<A> {
        let rate = if self.training {
            self.exploration_rate
        } else {
            0.0
        };
        policy::choose(&mut self.table, state, available, rate, &mut self.rng)
    }

    /// Score a transition and learn from it. Returns the reward.
    pub fn learn<A: Action>(
        &mut self,
        state: &StateKey,
        action: A,
        outcome: &TransitionOutcome,
        next_state: &StateKey,
    ) -> f64 {
        let reward = self.config.rewards.score(outcome);
        self.episode_reward += reward;

        if !self.training {
            return reward;
        }

        if !self.table.contains_state(state) {
            self.states_explored += 1;
        }
        let new_q =
            self.table
                .q_learning_update(state, action, reward, next_state, &self.config.learning);
        debug!(%state, action = action.id(), reward, new_q, "q-value updated");

        self.refresh_exploration_rate();
        self.maybe_prune();
        reward
    }

    /// Start a fresh episode; the running episode reward goes back to zero.
    pub fn begin_episode(&mut self) {
        self.episode_reward = 0.0;
    }

    /// Close the current episode and fold it into the statistics.
    pub fn end_episode(
        &mut self,
        final_population: u32,
        years_survived: u32,
        balanced: bool,
        smart_settlement: bool,
    ) -> EpisodeSummary {
        let summary = EpisodeSummary {
            reward: self.episode_reward,
            final_population,
            years_survived,
            balanced,
            smart_settlement,
        };
        self.stats.record_episode(&summary);
        self.episode_reward = 0.0;
        self.refresh_exploration_rate();

        info!(
            episode = self.stats.episodes,
            reward = summary.reward,
            population = final_population,
            years = years_survived,
            phase = self.phase().number(),
            exploration = self.exploration_rate,
            "episode finished"
        );
        summary
    }

    /// Count a founded city toward curriculum progress.
    pub fn record_city_founded(&mut self) {
        self.stats.record_city_founded();
        self.refresh_exploration_rate();
    }

    pub fn record_death(&mut self, cause: DeathCause, year: u32, population: u32, state: StateKey) {
        info!(%cause, year, population, %state, "agent died");
        self.deaths.record(cause, year, population, state);
    }

    pub fn death_analysis(&self) -> DeathAnalysis {
        self.deaths.analyze()
    }

    /// Current curriculum phase.
    pub fn phase(&self) -> Phase {
        self.config
            .curriculum
            .phase(self.stats.cities_built, self.stats.balanced_cities)
    }

    /// Exploration rate used by the next [`Self::choose`] in training mode.
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// Distinct states first reached through [`Self::learn`].
    pub fn states_explored(&self) -> u64 {
        self.states_explored
    }

    /// Reward accumulated since the episode began.
    pub fn episode_reward(&self) -> f64 {
        self.episode_reward
    }

    /// Prune the table against the configured size ceiling.
    pub fn prune(&mut self) -> usize {
        let removed = self.table.prune(self.config.prune.max_table_size);
        if removed > 0 {
            info!(
                removed,
                remaining = self.table.state_count(),
                "pruned q-table"
            );
        }
        removed
    }

    /// Store the table under the configured key.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        save_table(store, &self.config.storage_key, &self.table)
    }

    /// Replace the table with the stored one, if any.
    ///
    /// Returns `false`, leaving the current table alone, when nothing usable
    /// is stored.
    pub fn load<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> bool {
        match load_table(store, &self.config.storage_key) {
            Some(table) => {
                self.table = table;
                true
            }
            None => false,
        }
    }

    pub fn export_document(&self) -> ExportDocument {
        ExportDocument::new(self.table.clone(), self.stats.clone())
    }

    /// Adopt an imported brain. Statistics are kept when the import has none.
    pub fn apply_import(&mut self, brain: ImportedBrain) {
        self.table = brain.table;
        if let Some(stats) = brain.stats {
            self.stats = stats;
        }
        self.refresh_exploration_rate();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.table.clone(), self.stats.clone(), self.deaths.clone())
    }

    /// Save table, statistics and death log through `repo`.
    pub fn checkpoint<R: SnapshotRepository + ?Sized>(&self, repo: &R, path: &Path) -> Result<()> {
        repo.save(&self.snapshot(), path)
    }

    /// Replace table, statistics and death log from a checkpoint.
    ///
    /// Restored deaths are held to this session's `max_death_records`; the
    /// oldest are dropped when the checkpoint holds more.
    pub fn restore<R: SnapshotRepository + ?Sized>(&mut self, repo: &R, path: &Path) -> Result<()> {
        let snapshot = repo.load(path)?;
        if snapshot.version != SessionSnapshot::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: snapshot.version,
                expected: SessionSnapshot::VERSION,
            });
        }
        self.table = snapshot.table;
        self.stats = snapshot.stats;
        let mut deaths = DeathLog::new(self.config.max_death_records);
        for record in snapshot.deaths.records() {
            deaths.record(record.cause, record.year, record.population, record.state.clone());
        }
        self.deaths = deaths;
        self.refresh_exploration_rate();
        Ok(())
    }

    /// Forget everything learned and start over.
    pub fn reset(&mut self) {
        self.table.reset();
        self.stats.reset();
        self.deaths.clear();
        self.states_explored = 0;
        self.episode_reward = 0.0;
        self.updates_since_prune = 0;
        self.rng = build_rng(self.config.seed);
        self.refresh_exploration_rate();
    }

    fn refresh_exploration_rate(&mut self) {
        let phase = self.phase();
        self.exploration_rate = self
            .config
            .curriculum
            .exploration_rate(phase, self.stats.episodes);
    }

    fn maybe_prune(&mut self) {
        let interval = self.config.prune.interval;
        if interval == 0 {
            return;
        }
        self.updates_since_prune += 1;
        if self.updates_since_prune >= interval {
            self.updates_since_prune = 0;
            self.prune();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        actions::{CityAction, WanderAction},
        adapters::{InMemoryStore, MsgPackRepository},
        curriculum::CurriculumConfig,
    };

    fn session() -> TrainingSession {
        TrainingSession::new(SessionConfig::default().with_seed(3))
    }

    #[test]
    fn test_initial_exploration_rate_includes_phase_bonus() {
        let session = session();
        assert_eq!(session.phase(), Phase::Survive);
        assert!((session.exploration_rate() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_learn_applies_bellman_update() {
        let mut session = session();
        let here = StateKey::new("C|a");
        let there = StateKey::new("C|b");
        let outcome = TransitionOutcome {
            buildings_built: 2,
            ..TransitionOutcome::default()
        };

        let reward = session.learn(&here, CityAction::BuildRes, &outcome, &there);
        assert!((reward - 10.0).abs() < 1e-12);
        // 0 + 0.1 * (10 + 0.95 * 0 - 0)
        let q = session.table().peek(&here, "BUILD_RES").unwrap();
        assert!((q - 1.0).abs() < 1e-12);
        assert_eq!(session.states_explored(), 1);
        assert!((session.episode_reward() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_training_off_only_exploits() {
        let mut session = session();
        session.set_training(false);
        let state = StateKey::new("W|p0");
        let outcome = TransitionOutcome {
            pop_gained: 1,
            ..TransitionOutcome::default()
        };

        session.learn(&state, WanderAction::Interact, &outcome, &state);
        assert!(session.table().is_empty());

        for _ in 0..20 {
            assert_eq!(
                session.choose(&state, &[WanderAction::Wait, WanderAction::MoveN]),
                Some(WanderAction::Wait)
            );
        }
    }

    #[test]
    fn test_curriculum_progress_lowers_exploration() {
        let config = SessionConfig::default().with_curriculum(CurriculumConfig {
            phase1_threshold: 1,
            phase2_threshold: 1,
            base_exploration_rate: 0.5,
        });
        let mut session = TrainingSession::new(config);
        let start = session.exploration_rate();

        session.record_city_founded();
        assert_eq!(session.phase(), Phase::Balance);
        session.end_episode(12, 4, true, false);
        assert_eq!(session.phase(), Phase::Optimize);
        assert!(session.exploration_rate() < start);
    }

    #[test]
    fn test_end_episode_uses_accumulated_reward() {
        let mut session = session();
        let state = StateKey::new("C|a");
        let outcome = TransitionOutcome {
            years_survived: 1,
            ..TransitionOutcome::default()
        };
        session.begin_episode();
        session.learn(&state, CityAction::NextTurn, &outcome, &state);
        session.learn(&state, CityAction::NextTurn, &outcome, &state);

        let summary = session.end_episode(5, 2, false, true);
        assert!((summary.reward - 4.0).abs() < 1e-12);
        assert_eq!(session.stats().smart_settlements, 1);
        assert_eq!(session.episode_reward(), 0.0);
    }

    #[test]
    fn test_periodic_prune_bounds_table() {
        let config = SessionConfig::default()
            .with_seed(1)
            .with_max_table_size(10)
            .with_prune_interval(1);
        let mut session = TrainingSession::new(config);
        let terminal = StateKey::new("C|end");

        for i in 0..40 {
            let state = StateKey::new(format!("C|s{i}"));
            session.learn(&state, CityAction::Wait, &TransitionOutcome::default(), &terminal);
        }
        assert!(session.table().state_count() <= 10);
    }

    #[test]
    fn test_save_and_load_through_store() {
        let store = InMemoryStore::new();
        let mut trained = session();
        let state = StateKey::new("C|a");
        let outcome = TransitionOutcome {
            level_up: true,
            ..TransitionOutcome::default()
        };
        trained.learn(&state, CityAction::BuildWell, &outcome, &state);
        trained.save(&store).unwrap();
        assert!(store.contains("civil_zones_qtable"));

        let mut fresh = session();
        assert!(fresh.load(&store));
        assert_eq!(fresh.table(), trained.table());

        let mut empty = session();
        assert!(!empty.load(&InMemoryStore::new()));
        assert!(empty.table().is_empty());
    }

    #[test]
    fn test_apply_legacy_import_keeps_stats() {
        let mut session = session();
        session.end_episode(3, 1, false, false);

        let mut table = QTable::new();
        table.write(&StateKey::new("C|z"), "WAIT", 1.0);
        session.apply_import(ImportedBrain { table, stats: None });

        assert_eq!(session.table().state_count(), 1);
        assert_eq!(session.stats().episodes, 1);
    }

    #[test]
    fn test_reset_clears_learning() {
        let mut session = session();
        let state = StateKey::new("W|p0");
        session.learn(&state, WanderAction::Wait, &TransitionOutcome::default(), &state);
        session.record_death(DeathCause::Thirst, 2, 1, state);
        session.end_episode(1, 2, false, false);

        session.reset();
        assert!(session.table().is_empty());
        assert_eq!(session.stats().episodes, 0);
        assert!(session.deaths().is_empty());
        assert_eq!(session.states_explored(), 0);
    }

    #[test]
    fn test_restore_applies_configured_death_limit() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("session.msgpack");
        let repo = MsgPackRepository::new();

        let mut source = session();
        for year in 0..6 {
            source.record_death(DeathCause::Starvation, year, 1, StateKey::new("C|p0"));
        }
        source.checkpoint(&repo, &path).unwrap();

        let mut config = SessionConfig::default().with_seed(3);
        config.max_death_records = 4;
        let mut restored = TrainingSession::new(config);
        restored.restore(&repo, &path).unwrap();
        let years: Vec<u32> = restored.deaths().records().map(|r| r.year).collect();
        assert_eq!(years, vec![2, 3, 4, 5]);

        restored.record_death(DeathCause::Thirst, 9, 1, StateKey::new("C|p0"));
        assert_eq!(restored.deaths().len(), 4);
    }
}
