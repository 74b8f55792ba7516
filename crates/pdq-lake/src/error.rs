//! Lake error types.

/// Errors from the DuckDB-hosted product table.
#[derive(Debug, thiserror::Error)]
pub enum LakeError {
    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// `product_data` has not been loaded yet.
    #[error("Lake not initialized: {0}")]
    NotInitialized(String),

    /// The loaded table lacks a column the reports group on.
    #[error("Missing column '{0}' in product_data")]
    MissingColumn(String),

    /// I/O error (file operations on `DuckDB` files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
