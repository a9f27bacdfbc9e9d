//! CSV export of Q-table contents
//!
//! One row per stored (state, action) pair, ordered by state key and then
//! action id so repeated dumps of the same table diff cleanly.

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;
use tracing::info;

use crate::{Result, q_learning::QTable};

/// Which states to include in a dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegimeFilter {
    #[default]
    All,
    Wander,
    City,
}

impl RegimeFilter {
    fn admits(self, state: &str) -> bool {
        match self {
            RegimeFilter::All => true,
            RegimeFilter::Wander => state.starts_with("W|"),
            RegimeFilter::City => state.starts_with("C|"),
        }
    }
}

/// A single row in the Q-table CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QValueRecord {
    pub state: String,
    pub action: String,
    pub value: f64,
}

/// Exporter for Q-table CSV files
pub struct QTableCsvExporter;

impl QTableCsvExporter {
    /// Collect the rows admitted by `filter`, sorted.
    pub fn collect_records(table: &QTable, filter: RegimeFilter) -> Vec<QValueRecord> {
        let mut records: Vec<QValueRecord> = table
            .iter()
            .filter(|(state, _, _)| filter.admits(state.as_str()))
            .map(|(state, action, value)| QValueRecord {
                state: state.to_string(),
                action: action.to_string(),
                value,
            })
            .collect();
        records.sort_by(|a, b| a.state.cmp(&b.state).then_with(|| a.action.cmp(&b.action)));
        records
    }

    /// Write the rows admitted by `filter` to `writer`. Returns the row count.
    pub fn write<W: Write>(table: &QTable, filter: RegimeFilter, writer: W) -> Result<usize> {
        let records = Self::collect_records(table, filter);
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in &records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(records.len())
    }

    /// Export to a file at `path`.
    pub fn export(table: &QTable, filter: RegimeFilter, path: &Path) -> Result<usize> {
        let file = File::create(path)?;
        let rows = Self::write(table, filter, file)?;
        info!(path = %path.display(), rows, "exported q-values to CSV");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::StateKey;

    fn table() -> QTable {
        let mut table = QTable::new();
        table.write(&StateKey::new("W|b"), "WAIT", 1.5);
        table.write(&StateKey::new("C|a"), "NEXT_TURN", -2.0);
        table.write(&StateKey::new("C|a"), "BUILD_RES", 0.5);
        table
    }

    #[test]
    fn test_records_are_sorted() {
        let records = QTableCsvExporter::collect_records(&table(), RegimeFilter::All);
        let keys: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.state.as_str(), r.action.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("C|a", "BUILD_RES"), ("C|a", "NEXT_TURN"), ("W|b", "WAIT")]
        );
    }

    #[test]
    fn test_filter_by_regime() {
        let wander = QTableCsvExporter::collect_records(&table(), RegimeFilter::Wander);
        assert_eq!(wander.len(), 1);
        assert_eq!(wander[0].state, "W|b");

        let city = QTableCsvExporter::collect_records(&table(), RegimeFilter::City);
        assert_eq!(city.len(), 2);
    }

    #[test]
    fn test_write_emits_header_and_rows() {
        let mut buffer = Vec::new();
        let rows = QTableCsvExporter::write(&table(), RegimeFilter::City, &mut buffer).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "state,action,value");
        assert_eq!(lines[1], "C|a,BUILD_RES,0.5");
        assert_eq!(lines[2], "C|a,NEXT_TURN,-2.0");
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.csv");
        let rows = QTableCsvExporter::export(&table(), RegimeFilter::All, &path).unwrap();
        assert_eq!(rows, 3);
        assert!(std::fs::read_to_string(&path).unwrap().contains("W|b,WAIT,1.5"));
    }
}
