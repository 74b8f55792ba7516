//! # pdq-pipeline
//!
//! Cleaning → join → scoring over the three product datasets.
//!
//! ```text
//! DatasetSource ──► normalize (×3) ──► join ──► score ──► ScoredTable
//! ```
//!
//! Every stage is a pure, synchronous transformation of an owned [`Table`];
//! nothing here touches the filesystem. Row scoring is the only parallel step.

pub mod error;
pub mod join;
pub mod normalize;
pub mod score;
pub mod source;

pub use error::PipelineError;
pub use normalize::BadValues;
pub use source::{DatasetSource, InMemorySource};

use std::collections::BTreeMap;

use pdq_core::{ScoredTable, TableKind};
use serde::Serialize;

/// Row counts observed at each stage of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    /// Rows supplied by the source, per dataset.
    pub loaded: BTreeMap<TableKind, usize>,
    /// Rows removed for null join keys, per dataset.
    pub dropped: BTreeMap<TableKind, usize>,
    /// Rows produced by the joins.
    pub joined: usize,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub scored: ScoredTable,
    pub stats: StageStats,
}

/// Cleaning, join and scoring configured with a bad-value vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    bad_values: BadValues,
}

impl Pipeline {
    #[must_use]
    pub const fn new(bad_values: BadValues) -> Self {
        Self { bad_values }
    }

    #[must_use]
    pub const fn bad_values(&self) -> &BadValues {
        &self.bad_values
    }

    /// Load, normalize, join and score the datasets from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Source`] if a dataset cannot be loaded and
    /// [`PipelineError::MissingColumn`] if a join key column is absent.
    pub fn run(&self, source: &dyn DatasetSource) -> Result<PipelineOutput, PipelineError> {
        let mut stats = StageStats::default();

        let mut cleaned = BTreeMap::new();
        for kind in TableKind::ALL {
            let raw = source.load(kind)?;
            let loaded = raw.len();
            let table = normalize::normalize_kind(raw, kind, &self.bad_values);
            let dropped = loaded - table.len();
            tracing::info!(%kind, loaded, dropped, "normalized dataset");
            stats.loaded.insert(kind, loaded);
            stats.dropped.insert(kind, dropped);
            cleaned.insert(kind, table);
        }

        let joined = join::join(
            &cleaned[&TableKind::Property],
            &cleaned[&TableKind::Description],
            &cleaned[&TableKind::Manufacturer],
        )?;
        stats.joined = joined.len();
        tracing::info!(rows = joined.len(), columns = joined.columns().len(), "joined datasets");

        let scored = score::score(joined);
        let summary = scored.summary();
        tracing::info!(
            total = summary.total_records,
            complete = summary.complete_records,
            good = summary.good_quality_records,
            bad = summary.bad_quality_records,
            "scored records"
        );

        Ok(PipelineOutput { scored, stats })
    }
}
