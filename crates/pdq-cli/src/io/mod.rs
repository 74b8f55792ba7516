//! CSV adapters between files and pipeline tables.

pub mod csv_sink;
pub mod csv_source;

pub use csv_sink::{write_report_rows, write_scored};
pub use csv_source::{CsvSource, read_table};
