//! Subcommands of the `civil_zones_ai` binary

pub mod convert;
pub mod dump;
pub mod inspect;
pub mod prune;

use std::path::Path;

use anyhow::{Context, Result};

use crate::{config::SessionConfig, persistence::ImportedBrain};

/// Load a session config, falling back to defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

/// Import a brain file, bundled or legacy.
pub(crate) async fn load_brain(path: &Path) -> Result<ImportedBrain> {
    crate::persistence::import_file(path)
        .await
        .with_context(|| format!("Failed to import brain: {}", path.display()))
}
