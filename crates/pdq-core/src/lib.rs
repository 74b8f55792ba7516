//! # pdq-core
//!
//! Core types shared by every pdq crate.
//!
//! - [`Value`] / [`Cell`]: nullable scalar cells
//! - [`Table`]: column-labelled rows, the unit passed between pipeline stages
//! - [`TableKind`]: the three source datasets with their rename maps and join keys
//! - [`ScoredRecord`] / [`ScoredTable`]: joined rows with derived quality fields
//! - Canonical column names and the default bad-value vocabulary
//! - Cross-cutting error types

pub mod columns;
pub mod enums;
pub mod errors;
pub mod scored;
pub mod table;
pub mod value;

pub use enums::{DescriptionQuality, TableKind};
pub use errors::CoreError;
pub use scored::{ScoreSummary, ScoredRecord, ScoredTable};
pub use table::Table;
pub use value::{Cell, JoinKey, Value};

/// Source tokens that mean "no value".
///
/// Matched by exact, case-sensitive membership against untrimmed cell text.
pub const DEFAULT_BAD_VALUES: [&str; 12] = [
    "N/A", "n/a", "None", "none", "", " ", "-", "nan", "NaN", "null", "NULL", "'",
];
