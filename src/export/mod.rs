//! Export functionality for analysis
//!
//! Flattens learned Q-values into CSV for spreadsheet and notebook work.

mod q_table_csv;

pub use q_table_csv::{QTableCsvExporter, QValueRecord, RegimeFilter};
