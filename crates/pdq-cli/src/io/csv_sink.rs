use std::fs::File;
use std::path::Path;

use anyhow::Context;
use pdq_core::ScoredTable;
use serde::Serialize;

fn writer(path: &Path, delimiter: u8) -> anyhow::Result<csv::Writer<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))
}

/// Write a scored table with its derived columns. Nulls are empty fields.
pub fn write_scored(path: &Path, scored: &ScoredTable, delimiter: u8) -> anyhow::Result<usize> {
    let mut out = writer(path, delimiter)?;
    out.write_record(scored.output_columns())?;

    for record in scored.records() {
        let row = record
            .values()
            .iter()
            .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default())
            .chain([
                if record.is_complete() { "True" } else { "False" }.to_string(),
                record.missing_fields_count().to_string(),
                record.description_quality().as_str().to_string(),
            ]);
        out.write_record(row)?;
    }

    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(scored.len())
}

/// Write report rows under an explicit header line.
///
/// The header is written even when `rows` is empty.
pub fn write_report_rows<T: Serialize>(
    path: &Path,
    headers: &[&str],
    rows: &[T],
    delimiter: u8,
) -> anyhow::Result<usize> {
    let mut out = writer(path, delimiter)?;
    out.write_record(headers)?;
    for row in rows {
        out.serialize(row)
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(rows.len())
}
