//! # pdq-lake
//!
//! `DuckDB` host for the scored product table and the quality report queries.
//!
//! ## Storage
//!
//! A single table, `product_data`, holds one row per scored record: the joined
//! columns as `VARCHAR` plus `Is Complete`, `Missing Fields Count` and
//! `Description Quality`. Loading replaces the table wholesale, so the lake
//! always reflects exactly one pipeline run. Joined columns whose names
//! differ only by case are stored under suffixed names, since `DuckDB`
//! identifiers are case-insensitive.
//!
//! The lake is in-memory by default. A file-backed lake survives the process
//! and lets `pdq report` query the last run without re-reading the CSVs.
//!
//! ## Rounding
//!
//! Every percentage is `ROUND(x, 2)` on a `DOUBLE`, which rounds half away
//! from zero.

pub mod error;
pub mod queries;
pub mod schemas;

pub use error::LakeError;
pub use schemas::{
    BestManufacturerRow, EanCorrelationRow, FieldCompletionRow, ManufacturerQualityRow,
    MissingFieldTally, QualityReport,
};

use std::path::Path;

use duckdb::types::Value as SqlValue;
use duckdb::{Connection, params, params_from_iter};
use pdq_core::columns::DERIVED_COLUMNS;
use pdq_core::{Cell, ScoredTable, Value};

use crate::schemas::{PRODUCT_TABLE, create_product_table, quote_ident, storage_columns};

/// `DuckDB` lake holding the scored product table.
pub struct ProductLake {
    conn: Connection,
}

impl ProductLake {
    /// Open or create a file-backed lake. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::Io`] if the parent directory cannot be created and
    /// [`LakeError::DuckDb`] if the file cannot be opened.
    pub fn open_local(path: &Path) -> Result<Self, LakeError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened file-backed lake");
        Ok(Self { conn })
    }

    /// Open an in-memory lake.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if `DuckDB` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, LakeError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Access the underlying `DuckDB` connection.
    ///
    /// Prefer the typed report methods for standard queries.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Replace `product_data` with the contents of `scored`.
    ///
    /// Runs in one transaction. Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DuckDb`] if table creation or any insert fails.
    pub fn load_scored(&mut self, scored: &ScoredTable) -> Result<usize, LakeError> {
        let stored = storage_columns(scored.columns());
        let tx = self.conn.transaction()?;
        tx.execute_batch(&create_product_table(&stored))?;

        let column_list = stored
            .iter()
            .map(String::as_str)
            .chain(DERIVED_COLUMNS)
            .map(quote_ident)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; scored.columns().len() + 3].join(", ");
        let sql = format!("INSERT INTO {PRODUCT_TABLE} ({column_list}) VALUES ({placeholders})");

        {
            let mut stmt = tx.prepare(&sql)?;
            for record in scored.records() {
                let row = record
                    .values()
                    .iter()
                    .map(cell_to_sql)
                    .chain([
                        SqlValue::Boolean(record.is_complete()),
                        SqlValue::BigInt(
                            i64::try_from(record.missing_fields_count()).unwrap_or(i64::MAX),
                        ),
                        SqlValue::Text(record.description_quality().as_str().to_string()),
                    ]);
                stmt.execute(params_from_iter(row))?;
            }
        }

        tx.commit()?;
        tracing::info!(rows = scored.len(), "loaded scored records into lake");
        Ok(scored.len())
    }

    /// Stored columns of the loaded `product_data`, in table order.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotInitialized`] if no scored table has been loaded.
    pub fn columns(&self) -> Result<Vec<String>, LakeError> {
        let mut stmt = self.conn.prepare(
            "SELECT column_name FROM information_schema.columns
             WHERE table_name = ?
             ORDER BY ordinal_position",
        )?;
        let columns = stmt
            .query_map(params![PRODUCT_TABLE], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        if columns.is_empty() {
            return Err(LakeError::NotInitialized(format!(
                "table '{PRODUCT_TABLE}' does not exist; run the pipeline first"
            )));
        }
        Ok(columns)
    }

    /// Number of rows in `product_data`.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotInitialized`] if no scored table has been loaded.
    pub fn record_count(&self) -> Result<i64, LakeError> {
        self.columns()?;
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {PRODUCT_TABLE}"), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }
}

fn cell_to_sql(cell: &Cell) -> SqlValue {
    match cell {
        None => SqlValue::Null,
        Some(Value::Text(s)) => SqlValue::Text(s.clone()),
        Some(other) => SqlValue::Text(other.to_string()),
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use pdq_core::{DescriptionQuality, ScoredRecord};

    use super::test_support::{BAD_NO_EAN, GOOD, record, table};
    use super::*;

    #[test]
    fn load_creates_product_table() {
        let mut lake = ProductLake::open_in_memory().expect("open lake");
        let scored = table(vec![record(Some("Acme"), GOOD), record(Some("Acme"), BAD_NO_EAN)]);

        let inserted = lake.load_scored(&scored).expect("load");

        assert_eq!(inserted, 2);
        assert_eq!(lake.record_count().unwrap(), 2);
        assert_eq!(lake.columns().unwrap(), scored.output_columns());
    }

    #[test]
    fn derived_columns_are_typed() {
        let mut lake = ProductLake::open_in_memory().expect("open lake");
        lake.load_scored(&table(vec![record(Some("Acme"), BAD_NO_EAN)]))
            .expect("load");

        let (complete, missing, quality): (bool, i64, String) = lake
            .conn()
            .query_row(
                "SELECT \"Is Complete\", \"Missing Fields Count\", \"Description Quality\" FROM product_data",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert!(!complete);
        assert_eq!(missing, 1);
        assert_eq!(quality, "bad");
    }

    #[test]
    fn reload_replaces_previous_run() {
        let mut lake = ProductLake::open_in_memory().expect("open lake");
        lake.load_scored(&table(vec![record(Some("A"), GOOD); 5]))
            .expect("first load");
        lake.load_scored(&table(vec![record(Some("B"), GOOD)]))
            .expect("second load");
        assert_eq!(lake.record_count().unwrap(), 1);
    }

    #[test]
    fn unloaded_lake_is_not_initialized() {
        let lake = ProductLake::open_in_memory().expect("open lake");
        assert!(matches!(lake.columns(), Err(LakeError::NotInitialized(_))));
        assert!(matches!(lake.record_count(), Err(LakeError::NotInitialized(_))));
    }

    #[test]
    fn case_variant_columns_load_side_by_side() {
        let mut lake = ProductLake::open_in_memory().expect("open lake");
        let scored = ScoredTable::new(
            vec!["Manufacturer name".into(), "Color".into(), "color".into()],
            vec![ScoredRecord::new(
                vec![
                    Some(Value::from("Acme")),
                    Some(Value::from("red")),
                    Some(Value::from("blue")),
                ],
                DescriptionQuality::Bad,
            )],
        );

        assert_eq!(lake.load_scored(&scored).expect("load"), 1);
        assert_eq!(
            lake.columns().unwrap(),
            [
                "Manufacturer name",
                "Color",
                "color_2",
                "Is Complete",
                "Missing Fields Count",
                "Description Quality"
            ]
        );

        let (upper, lower): (String, String) = lake
            .conn()
            .query_row("SELECT \"Color\", \"color_2\" FROM product_data", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!((upper.as_str(), lower.as_str()), ("red", "blue"));
        assert_eq!(lake.manufacturer_quality_stats().unwrap()[0].total_products, 1);
    }

    #[test]
    fn numeric_cells_are_stored_as_text() {
        assert_eq!(cell_to_sql(&Some(Value::from(12_i64))), SqlValue::Text("12".into()));
        assert_eq!(cell_to_sql(&None), SqlValue::Null);
    }
}
