//! The five quality reports over `product_data`.
//!
//! Each query reads through a `base` CTE that projects the manufacturer name,
//! the description quality and the six tracked fields as `field_0..field_5`.
//! A tracked field that is not a column of the loaded table is projected as
//! `NULL`, so every report degrades to "all missing" instead of failing. The
//! manufacturer name is the grouping key and must be present.

use duckdb::Row;
use pdq_core::DescriptionQuality;
use pdq_core::columns::{DESCRIPTION_QUALITY, EAN_FIELD_INDEX, MANUFACTURER_NAME, QUALITY_FIELDS};

use crate::schemas::{
    BestManufacturerRow, EanCorrelationRow, FieldCompletionRow, ManufacturerQualityRow,
    MissingFieldTally, PRODUCT_TABLE, QualityReport, quote_ident, quote_literal,
};
use crate::{LakeError, ProductLake};

/// `ROUND(share of rows matching predicate * 100, 2)` within the current group.
fn percentage(predicate: &str) -> String {
    format!(
        "ROUND(CAST(COUNT(*) FILTER (WHERE {predicate}) AS DOUBLE) * 100.0 / COUNT(*), 2)"
    )
}

fn quality_is(quality: DescriptionQuality) -> String {
    format!("description_quality = {}", quote_literal(quality.as_str()))
}

fn field_alias(index: usize) -> String {
    format!("field_{index}")
}

impl ProductLake {
    /// `WITH base AS (...)` over the loaded table.
    fn base_cte(&self) -> Result<String, LakeError> {
        let present = self.columns()?;
        let is_present = |name: &str| present.iter().any(|c| c == name);
        if !is_present(MANUFACTURER_NAME) {
            return Err(LakeError::MissingColumn(MANUFACTURER_NAME.to_string()));
        }
        let project = |name: &str| {
            if is_present(name) {
                quote_ident(name)
            } else {
                "NULL".to_string()
            }
        };

        let mut select = vec![
            format!("{} AS manufacturer_name", quote_ident(MANUFACTURER_NAME)),
            format!("{} AS description_quality", quote_ident(DESCRIPTION_QUALITY)),
        ];
        select.extend(
            QUALITY_FIELDS
                .iter()
                .enumerate()
                .map(|(i, field)| format!("{} AS {}", project(field), field_alias(i))),
        );

        Ok(format!(
            "WITH base AS (SELECT {} FROM {PRODUCT_TABLE})",
            select.join(", ")
        ))
    }

    /// Per-manufacturer bad-description counts, worst first.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotInitialized`] if no scored table is loaded and
    /// [`LakeError::MissingColumn`] if it has no `Manufacturer name` column.
    pub fn manufacturer_quality_stats(&self) -> Result<Vec<ManufacturerQualityRow>, LakeError> {
        let bad = quality_is(DescriptionQuality::Bad);
        let sql = format!(
            "{base}
             SELECT manufacturer_name,
                    COUNT(*) AS total_products,
                    COUNT(*) FILTER (WHERE {bad}) AS bad_quality_count,
                    {pct} AS bad_quality_percentage
             FROM base
             GROUP BY manufacturer_name
             ORDER BY bad_quality_count DESC, manufacturer_name ASC NULLS LAST",
            base = self.base_cte()?,
            pct = percentage(&bad),
        );

        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ManufacturerQualityRow {
                    manufacturer_name: row.get(0)?,
                    total_products: row.get(1)?,
                    bad_quality_count: row.get(2)?,
                    bad_quality_percentage: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Non-null share of each tracked field, per manufacturer.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotInitialized`] if no scored table is loaded and
    /// [`LakeError::MissingColumn`] if it has no `Manufacturer name` column.
    pub fn field_completion_rates(&self) -> Result<Vec<FieldCompletionRow>, LakeError> {
        let per_field = QUALITY_FIELDS
            .iter()
            .enumerate()
            .map(|(i, field)| {
                format!(
                    "SELECT manufacturer_name, {name} AS field_name, {i} AS field_order,
                            {pct} AS completion_rate
                     FROM base
                     GROUP BY manufacturer_name",
                    name = quote_literal(field),
                    pct = percentage(&format!("{} IS NOT NULL", field_alias(i))),
                )
            })
            .collect::<Vec<_>>()
            .join("\nUNION ALL\n");

        let sql = format!(
            "{base}
             SELECT manufacturer_name, field_name, completion_rate, field_order
             FROM ({per_field}) AS completion
             ORDER BY manufacturer_name ASC NULLS LAST, completion_rate DESC, field_order ASC",
            base = self.base_cte()?,
        );

        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(FieldCompletionRow {
                    manufacturer_name: row.get(0)?,
                    field_name: row.get(1)?,
                    completion_rate: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Bad-description share for records with and without an EAN.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotInitialized`] if no scored table is loaded and
    /// [`LakeError::MissingColumn`] if it has no `Manufacturer name` column.
    pub fn ean_correlation(&self) -> Result<Vec<EanCorrelationRow>, LakeError> {
        let ean = field_alias(EAN_FIELD_INDEX);
        let sql = format!(
            "{base}
             SELECT CASE WHEN {ean} IS NULL THEN 'Missing EAN' ELSE 'Has EAN' END AS ean_status,
                    {pct} AS bad_description_percentage
             FROM base
             GROUP BY ean_status
             ORDER BY ean_status",
            base = self.base_cte()?,
            pct = percentage(&quality_is(DescriptionQuality::Bad)),
        );

        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EanCorrelationRow {
                    ean_status: row.get(0)?,
                    bad_description_percentage: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Global null counts for the tracked fields.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotInitialized`] if no scored table is loaded and
    /// [`LakeError::MissingColumn`] if it has no `Manufacturer name` column.
    pub fn missing_field_tally(&self) -> Result<MissingFieldTally, LakeError> {
        let counts = (0..QUALITY_FIELDS.len())
            .map(|i| format!("COUNT(*) FILTER (WHERE {} IS NULL)", field_alias(i)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "{base}
             SELECT {counts}, COUNT(*) AS total_records FROM base",
            base = self.base_cte()?,
        );

        let tally = self.conn().query_row(&sql, [], |row| {
            Ok(MissingFieldTally {
                missing_short_desc: row.get(0)?,
                missing_short_desc2: row.get(1)?,
                missing_long_desc: row.get(2)?,
                missing_ean: row.get(3)?,
                missing_picture: row.get(4)?,
                missing_technical_details: row.get(5)?,
                total_records: row.get(6)?,
            })
        })?;
        Ok(tally)
    }

    /// The manufacturer with the highest good-description share.
    ///
    /// Ties go to the higher good count, then the alphabetically first name.
    /// `None` when the table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotInitialized`] if no scored table is loaded and
    /// [`LakeError::MissingColumn`] if it has no `Manufacturer name` column.
    pub fn best_manufacturer(&self) -> Result<Option<BestManufacturerRow>, LakeError> {
        let good = quality_is(DescriptionQuality::Good);
        let sql = format!(
            "{base}
             SELECT manufacturer_name,
                    COUNT(*) AS total_products,
                    COUNT(*) FILTER (WHERE {good}) AS good_quality_count,
                    {pct} AS good_quality_percentage
             FROM base
             GROUP BY manufacturer_name
             ORDER BY good_quality_percentage DESC,
                      good_quality_count DESC,
                      manufacturer_name ASC NULLS LAST
             LIMIT 1",
            base = self.base_cte()?,
            pct = percentage(&good),
        );

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query_map([], best_from_row)?;
        Ok(rows.next().transpose()?)
    }

    /// Run all five reports against the current table.
    ///
    /// # Errors
    ///
    /// Returns the first query error.
    pub fn quality_report(&self) -> Result<QualityReport, LakeError> {
        Ok(QualityReport {
            manufacturer_quality: self.manufacturer_quality_stats()?,
            field_completion: self.field_completion_rates()?,
            ean_correlation: self.ean_correlation()?,
            missing_fields: self.missing_field_tally()?,
            best_manufacturer: self.best_manufacturer()?,
        })
    }
}

fn best_from_row(row: &Row<'_>) -> duckdb::Result<BestManufacturerRow> {
    Ok(BestManufacturerRow {
        manufacturer_name: row.get(0)?,
        total_products: row.get(1)?,
        good_quality_count: row.get(2)?,
        good_quality_percentage: row.get(3)?,
    })
}
