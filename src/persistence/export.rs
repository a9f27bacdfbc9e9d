//! Brain export documents and their import.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{Result, error::Error, q_learning::QTable, stats::TrainingStats};

/// Format version written into every export.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Field whose presence marks a bundled document rather than a bare table.
const BUNDLE_MARKER: &str = "qTable";

/// Bundled export of a learned policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub q_table: QTable,
    pub stats: TrainingStats,
    pub exported_at: DateTime<Utc>,
    pub version: String,
}

impl ExportDocument {
    /// Bundle `q_table` and `stats`, stamped with the current time.
    pub fn new(q_table: QTable, stats: TrainingStats) -> Self {
        Self {
            q_table,
            stats,
            exported_at: Utc::now(),
            version: EXPORT_FORMAT_VERSION.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Conventional file name for this export.
    pub fn file_name(&self) -> String {
        export_file_name(&self.exported_at)
    }

    /// Write the document to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let text = self.to_json()?;
        fs::write(path, text).map_err(|source| Error::Io {
            operation: format!("write export {path:?}"),
            source,
        })?;
        info!(path = %path.display(), states = self.q_table.state_count(), "exported brain");
        Ok(())
    }

    /// Write the document into `dir` under its conventional file name.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        self.write_to(&path)?;
        Ok(path)
    }
}

/// `civil_zones_ai_brain_<epoch-ms>.json`
pub fn export_file_name(exported_at: &DateTime<Utc>) -> String {
    format!(
        "civil_zones_ai_brain_{}.json",
        exported_at.timestamp_millis()
    )
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedBrain {
    pub table: QTable,
    /// Absent for legacy bare-table documents.
    pub stats: Option<TrainingStats>,
}

/// Lenient view of a bundled document: only the table is required.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundledImport {
    q_table: QTable,
    #[serde(default)]
    stats: Option<TrainingStats>,
}

/// Parse an export document, bundled or legacy.
///
/// # Errors
///
/// Returns [`Error::ImportFailed`] for anything that is not a JSON object
/// holding a well-formed table; no partial table is ever returned.
pub fn parse_import(text: &str) -> Result<ImportedBrain> {
    let value: Value = serde_json::from_str(text).map_err(import_failed)?;
    let Value::Object(fields) = &value else {
        return Err(Error::ImportFailed {
            reason: "expected a JSON object".to_string(),
        });
    };

    if fields.contains_key(BUNDLE_MARKER) {
        let bundled: BundledImport = serde_json::from_value(value).map_err(import_failed)?;
        Ok(ImportedBrain {
            table: bundled.q_table,
            stats: bundled.stats,
        })
    } else {
        let table: QTable = serde_json::from_value(value).map_err(import_failed)?;
        Ok(ImportedBrain { table, stats: None })
    }
}

/// Read and parse an export document from disk.
///
/// # Errors
///
/// Returns [`Error::ImportFailed`] if the file cannot be read or parsed.
pub async fn import_file(path: impl AsRef<Path>) -> Result<ImportedBrain> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "could not read brain file");
        Error::ImportFailed {
            reason: format!("could not read {}: {e}", path.display()),
        }
    })?;

    let brain = parse_import(&text).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "rejected brain file");
    })?;
    info!(
        path = %path.display(),
        states = brain.table.state_count(),
        legacy = brain.stats.is_none(),
        "imported brain"
    );
    Ok(brain)
}

fn import_failed(e: serde_json::Error) -> Error {
    Error::ImportFailed {
        reason: e.to_string(),
    }
}
