//! Pipeline error types.

use pdq_core::{CoreError, TableKind};

/// Errors raised while loading, cleaning, joining or scoring datasets.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A table-level invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A column the join needs is not present.
    #[error("Column '{column}' missing from {table} table")]
    MissingColumn {
        /// Which side of the join (e.g., "property", "property+description").
        table: String,
        /// The absent column.
        column: String,
    },

    /// The dataset source could not supply a table.
    #[error("Failed to load {kind} dataset: {reason}")]
    Source {
        /// Dataset that failed.
        kind: TableKind,
        /// Collaborator-provided detail.
        reason: String,
    },

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
