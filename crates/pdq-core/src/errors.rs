//! Cross-cutting error types for pdq.
//!
//! Stage-specific errors (`PipelineError`, `LakeError`, `ConfigError`) live in
//! their own crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A row does not have one cell per column.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
