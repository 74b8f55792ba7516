//! Where raw datasets come from.

use std::collections::HashMap;

use pdq_core::{Table, TableKind};

use crate::PipelineError;

/// Supplies the three raw datasets, already split into columns.
///
/// Parsing robustness (delimiters, encodings, ragged lines) is the
/// implementor's problem; the pipeline only sees [`Table`]s.
pub trait DatasetSource {
    /// Load the dataset of the given kind.
    ///
    /// # Errors
    ///
    /// Implementations return [`PipelineError::Source`] when the dataset cannot be read.
    fn load(&self, kind: TableKind) -> Result<Table, PipelineError>;
}

/// Datasets held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<TableKind, Table>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, kind: TableKind, table: Table) -> Self {
        self.tables.insert(kind, table);
        self
    }

    pub fn insert(&mut self, kind: TableKind, table: Table) {
        self.tables.insert(kind, table);
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self, kind: TableKind) -> Result<Table, PipelineError> {
        self.tables
            .get(&kind)
            .cloned()
            .ok_or_else(|| PipelineError::Source {
                kind,
                reason: "no table registered".to_string(),
            })
    }
}
