//! CLI infrastructure for inspecting and maintaining exported brains
//!
//! This module provides the command-line interface for looking inside,
//! pruning, converting and dumping Q-learning brain files.

pub mod commands;
pub mod output;
