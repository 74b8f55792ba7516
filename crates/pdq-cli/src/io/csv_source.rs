use std::path::Path;

use anyhow::Context;
use pdq_config::InputConfig;
use pdq_core::{Cell, Table, TableKind, Value};
use pdq_pipeline::{DatasetSource, PipelineError};

/// Reads the three datasets from delimited files named by [`InputConfig`].
pub struct CsvSource {
    input: InputConfig,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(input: InputConfig, delimiter: u8) -> Self {
        Self { input, delimiter }
    }
}

impl DatasetSource for CsvSource {
    fn load(&self, kind: TableKind) -> Result<Table, PipelineError> {
        let path = self.input.path_for(kind);
        read_table(&path, self.delimiter).map_err(|error| PipelineError::Source {
            kind,
            reason: format!("{error:#}"),
        })
    }
}

/// Read a headed delimited file. Every cell is text; empty fields stay `""`.
///
/// Rows with a different field count than the header are an error.
pub fn read_table(path: &Path, delimiter: u8) -> anyhow::Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let columns = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut table = Table::new(columns);
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed row in {}", path.display()))?;
        let row: Vec<Cell> = record.iter().map(|field| Some(Value::from(field))).collect();
        table
            .push_row(row)
            .with_context(|| format!("row {} of {}", line + 1, path.display()))?;
    }

    tracing::debug!(path = %path.display(), rows = table.len(), "read dataset");
    Ok(table)
}
