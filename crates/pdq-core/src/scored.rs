//! Joined records with their derived quality fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::columns::DERIVED_COLUMNS;
use crate::{Cell, DescriptionQuality, Value};

/// A joined record plus the fields computed by the quality scorer.
///
/// The derived fields are fixed at construction. `missing_fields_count` is
/// the number of null cells in `values` and `is_complete` is always
/// `missing_fields_count == 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    values: Vec<Cell>,
    is_complete: bool,
    missing_fields_count: usize,
    description_quality: DescriptionQuality,
}

impl ScoredRecord {
    #[must_use]
    pub fn new(values: Vec<Cell>, description_quality: DescriptionQuality) -> Self {
        let missing_fields_count = values.iter().filter(|cell| cell.is_none()).count();
        Self {
            values,
            is_complete: missing_fields_count == 0,
            missing_fields_count,
            description_quality,
        }
    }

    #[must_use]
    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    #[must_use]
    pub const fn missing_fields_count(&self) -> usize {
        self.missing_fields_count
    }

    #[must_use]
    pub const fn description_quality(&self) -> DescriptionQuality {
        self.description_quality
    }
}

/// The terminal dataset of the pipeline. Read-only from here on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoredTable {
    columns: Vec<String>,
    records: Vec<ScoredRecord>,
}

impl ScoredTable {
    #[must_use]
    pub const fn new(columns: Vec<String>, records: Vec<ScoredRecord>) -> Self {
        Self { columns, records }
    }

    /// Joined columns, without the derived ones.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Joined columns followed by `Is Complete`, `Missing Fields Count`, `Description Quality`.
    #[must_use]
    pub fn output_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .cloned()
            .chain(DERIVED_COLUMNS.iter().map(|c| (*c).to_string()))
            .collect()
    }

    #[must_use]
    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of a joined column; unknown columns read as null.
    #[must_use]
    pub fn get(&self, record: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.records.get(record)?.values.get(idx)?.as_ref()
    }

    /// Subset holding only records with the given quality label.
    #[must_use]
    pub fn with_quality(&self, quality: DescriptionQuality) -> Self {
        Self {
            columns: self.columns.clone(),
            records: self
                .records
                .iter()
                .filter(|r| r.description_quality == quality)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        let mut summary = ScoreSummary {
            total_records: self.records.len(),
            ..ScoreSummary::default()
        };
        for record in &self.records {
            if record.is_complete {
                summary.complete_records += 1;
            }
            match record.description_quality {
                DescriptionQuality::Good => summary.good_quality_records += 1,
                DescriptionQuality::Bad => summary.bad_quality_records += 1,
            }
            *summary
                .missing_fields_distribution
                .entry(record.missing_fields_count)
                .or_insert(0) += 1;
        }
        summary.incomplete_records = summary.total_records - summary.complete_records;
        summary
    }
}

/// Headline counts over a scored table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub total_records: usize,
    pub complete_records: usize,
    pub incomplete_records: usize,
    pub good_quality_records: usize,
    pub bad_quality_records: usize,
    /// Missing-field count → number of records with that count, ascending.
    pub missing_fields_distribution: BTreeMap<usize, usize>,
}
