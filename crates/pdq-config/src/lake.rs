//! Aggregation lake location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LakeConfig {
    /// `DuckDB` file path. Empty means an in-memory lake per run.
    #[serde(default)]
    pub path: String,
}

impl LakeConfig {
    /// Whether runs persist the scored table to a file.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        !self.path.trim().is_empty()
    }

    /// The lake file, if persistent.
    #[must_use]
    pub fn file(&self) -> Option<PathBuf> {
        self.is_persistent().then(|| PathBuf::from(self.path.trim()))
    }
}
