//! `product_data` DDL and report row structs.
//!
//! The scored table's columns are only known at runtime, so the DDL is built
//! from the joined column list. Data columns are stored as `VARCHAR`; the
//! report queries only group on them or test them for `NULL`.
//!
//! `DuckDB` matches identifiers case-insensitively even when quoted, so joined
//! columns that differ only by case are stored under distinct names. See
//! [`storage_columns`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use pdq_core::columns::{
    DERIVED_COLUMNS, DESCRIPTION_QUALITY, IS_COMPLETE, MANUFACTURER_NAME, MISSING_FIELDS_COUNT,
    QUALITY_FIELDS,
};

/// Name of the scored table inside the lake.
pub const PRODUCT_TABLE: &str = "product_data";

/// Quote an SQL identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an SQL string literal, doubling embedded quotes.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Stored name for each joined column, in order.
///
/// The derived columns and the first exact occurrence of the manufacturer name
/// and each tracked field keep their names. Any other column whose name is
/// already taken, ignoring case, is stored as `{name}_2`, `{name}_3`, ...
#[must_use]
pub fn storage_columns(columns: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = DERIVED_COLUMNS.iter().map(|c| c.to_lowercase()).collect();
    let reserved: Vec<bool> = columns
        .iter()
        .map(|c| {
            let report_column = c == MANUFACTURER_NAME || QUALITY_FIELDS.contains(&c.as_str());
            report_column && taken.insert(c.to_lowercase())
        })
        .collect();

    columns
        .iter()
        .zip(reserved)
        .map(|(column, keep)| {
            if keep {
                return column.clone();
            }
            let mut name = column.clone();
            let mut n = 2;
            while !taken.insert(name.to_lowercase()) {
                name = format!("{column}_{n}");
                n += 1;
            }
            name
        })
        .collect()
}

/// `DROP` + `CREATE` statements for a scored table with the given stored columns.
#[must_use]
pub fn create_product_table(columns: &[String]) -> String {
    let mut defs: Vec<String> = columns
        .iter()
        .map(|c| format!("    {} VARCHAR", quote_ident(c)))
        .collect();
    defs.push(format!("    {} BOOLEAN NOT NULL", quote_ident(IS_COMPLETE)));
    defs.push(format!("    {} BIGINT NOT NULL", quote_ident(MISSING_FIELDS_COUNT)));
    defs.push(format!("    {} VARCHAR NOT NULL", quote_ident(DESCRIPTION_QUALITY)));

    format!(
        "DROP TABLE IF EXISTS {PRODUCT_TABLE};\nCREATE TABLE {PRODUCT_TABLE} (\n{}\n);",
        defs.join(",\n")
    )
}

// ── Report rows ────────────────────────────────────────────────────────────

/// Per-manufacturer bad-description counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerQualityRow {
    #[serde(rename = "Manufacturer name")]
    pub manufacturer_name: Option<String>,
    pub total_products: i64,
    pub bad_quality_count: i64,
    pub bad_quality_percentage: f64,
}

impl ManufacturerQualityRow {
    pub const HEADERS: [&'static str; 4] = [
        "Manufacturer name",
        "total_products",
        "bad_quality_count",
        "bad_quality_percentage",
    ];
}

/// Share of non-null values for one tracked field of one manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCompletionRow {
    #[serde(rename = "Manufacturer name")]
    pub manufacturer_name: Option<String>,
    pub field_name: String,
    pub completion_rate: f64,
}

impl FieldCompletionRow {
    pub const HEADERS: [&'static str; 3] = ["Manufacturer name", "field_name", "completion_rate"];
}

/// Bad-description share for records with and without an EAN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EanCorrelationRow {
    /// `Has EAN` or `Missing EAN`.
    pub ean_status: String,
    pub bad_description_percentage: f64,
}

impl EanCorrelationRow {
    pub const HEADERS: [&'static str; 2] = ["ean_status", "bad_description_percentage"];
}

/// Global null counts for the tracked fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFieldTally {
    pub missing_short_desc: i64,
    pub missing_short_desc2: i64,
    pub missing_long_desc: i64,
    pub missing_ean: i64,
    pub missing_picture: i64,
    pub missing_technical_details: i64,
    pub total_records: i64,
}

impl MissingFieldTally {
    pub const HEADERS: [&'static str; 7] = [
        "missing_short_desc",
        "missing_short_desc2",
        "missing_long_desc",
        "missing_ean",
        "missing_picture",
        "missing_technical_details",
        "total_records",
    ];

    /// Per-field counts in report field order.
    #[must_use]
    pub const fn field_counts(&self) -> [i64; 6] {
        [
            self.missing_short_desc,
            self.missing_short_desc2,
            self.missing_long_desc,
            self.missing_ean,
            self.missing_picture,
            self.missing_technical_details,
        ]
    }
}

/// The manufacturer with the best good-description share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestManufacturerRow {
    #[serde(rename = "Manufacturer name")]
    pub manufacturer_name: Option<String>,
    pub total_products: i64,
    pub good_quality_count: i64,
    pub good_quality_percentage: f64,
}

impl BestManufacturerRow {
    pub const HEADERS: [&'static str; 4] = [
        "Manufacturer name",
        "total_products",
        "good_quality_count",
        "good_quality_percentage",
    ];
}

/// All five reports from one lake snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub manufacturer_quality: Vec<ManufacturerQualityRow>,
    pub field_completion: Vec<FieldCompletionRow>,
    pub ean_correlation: Vec<EanCorrelationRow>,
    pub missing_fields: MissingFieldTally,
    pub best_manufacturer: Option<BestManufacturerRow>,
}
