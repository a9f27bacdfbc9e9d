//! Q-learning controller for Civil Zones
//!
//! This crate provides:
//! - State encoders that squash wander and city observations into finite keys
//! - A sparse Q-table with read-with-default semantics and value-based pruning
//! - ε-greedy action selection and the one-step Bellman update
//! - A weighted reward function over transition outcomes
//! - A three-phase curriculum driving the exploration rate
//! - Episode statistics and a bounded death log
//! - Persistence to key-value stores, JSON export documents and binary checkpoints
//! - CSV dumps of learned values and a CLI for offline brain maintenance

pub mod actions;
pub mod adapters;
pub mod cli;
pub mod config;
pub mod curriculum;
pub mod encoding;
pub mod error;
pub mod export;
pub mod identifiers;
pub mod outcome;
pub mod persistence;
pub mod ports;
pub mod q_learning;
pub mod reward;
pub mod session;
pub mod stats;

pub use actions::{Action, CityAction, WanderAction};
pub use config::SessionConfig;
pub use curriculum::Phase;
pub use error::{Error, Result};
pub use identifiers::StateKey;
pub use outcome::{DeathCause, TransitionOutcome};
pub use q_learning::{LearningParams, QTable};
pub use session::TrainingSession;
