//! Per-record completeness and description-quality scoring.
//!
//! Each row is scored independently against the column set the joined table
//! had when scoring started, so rows are spread across the rayon pool. The
//! indexed collect keeps the input order.

use rayon::prelude::*;

use pdq_core::columns::{DESCRIPTION_TEXT_FIELDS, EAN, PICTURE_NORMAL_REDUCED, TECHNICAL_DETAILS};
use pdq_core::{Cell, DescriptionQuality, ScoredRecord, ScoredTable, Table};

/// Column positions the quality check reads. `None` for columns the table lacks.
#[derive(Debug, Clone)]
struct QualityColumns {
    description_text: Vec<Option<usize>>,
    ean: Option<usize>,
    picture: Option<usize>,
    technical_details: Option<usize>,
}

impl QualityColumns {
    fn resolve(table: &Table) -> Self {
        Self {
            description_text: DESCRIPTION_TEXT_FIELDS
                .iter()
                .map(|c| table.column_index(c))
                .collect(),
            ean: table.column_index(EAN),
            picture: table.column_index(PICTURE_NORMAL_REDUCED),
            technical_details: table.column_index(TECHNICAL_DETAILS),
        }
    }
}

/// Score every joined row.
#[must_use]
pub fn score(table: Table) -> ScoredTable {
    let quality_columns = QualityColumns::resolve(&table);
    let (columns, rows) = table.into_parts();

    let records: Vec<ScoredRecord> = rows
        .into_par_iter()
        .map(|row| {
            let quality = assess(&row, &quality_columns);
            ScoredRecord::new(row, quality)
        })
        .collect();

    tracing::debug!(records = records.len(), "scored records");
    ScoredTable::new(columns, records)
}

/// Quality label for row `row` of `table`.
///
/// `good` needs some description text, an EAN, a reduced picture and technical
/// details. Absent columns count as null.
#[must_use]
pub fn assess_description_quality(table: &Table, row: usize) -> DescriptionQuality {
    let columns = QualityColumns::resolve(table);
    table
        .rows()
        .get(row)
        .map_or(DescriptionQuality::Bad, |cells| assess(cells, &columns))
}

fn assess(row: &[Cell], columns: &QualityColumns) -> DescriptionQuality {
    let present = |idx: Option<usize>| idx.is_some_and(|i| row[i].is_some());

    let has_description = columns.description_text.iter().any(|&i| present(i));
    if has_description
        && present(columns.ean)
        && present(columns.picture)
        && present(columns.technical_details)
    {
        DescriptionQuality::Good
    } else {
        DescriptionQuality::Bad
    }
}
