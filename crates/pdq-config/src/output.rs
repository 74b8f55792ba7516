//! Where exported tables and reports are written.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from("output")
}

fn name(s: &str) -> String {
    s.to_string()
}

fn default_merged() -> String {
    name("merged_data_with_completeness.csv")
}

fn default_good() -> String {
    name("good_quality_data.csv")
}

fn default_bad() -> String {
    name("bad_quality_data.csv")
}

fn default_manufacturer_quality() -> String {
    name("manufacturer_quality_stats.csv")
}

fn default_field_completion() -> String {
    name("field_completion_rates.csv")
}

fn default_ean_correlation() -> String {
    name("ean_description_quality_correlation.csv")
}

fn default_missing_fields() -> String {
    name("missing_field_combinations.csv")
}

fn default_best_manufacturer() -> String {
    name("best_manufacturer.csv")
}

fn default_summary() -> String {
    name("run_summary.json")
}

const fn default_delimiter() -> char {
    ','
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory all exports are written into. Created on demand.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_merged")]
    pub merged: String,

    #[serde(default = "default_good")]
    pub good: String,

    #[serde(default = "default_bad")]
    pub bad: String,

    #[serde(default = "default_manufacturer_quality")]
    pub manufacturer_quality: String,

    #[serde(default = "default_field_completion")]
    pub field_completion: String,

    #[serde(default = "default_ean_correlation")]
    pub ean_correlation: String,

    #[serde(default = "default_missing_fields")]
    pub missing_fields: String,

    #[serde(default = "default_best_manufacturer")]
    pub best_manufacturer: String,

    /// JSON run summary.
    #[serde(default = "default_summary")]
    pub summary: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            merged: default_merged(),
            good: default_good(),
            bad: default_bad(),
            manufacturer_quality: default_manufacturer_quality(),
            field_completion: default_field_completion(),
            ean_correlation: default_ean_correlation(),
            missing_fields: default_missing_fields(),
            best_manufacturer: default_best_manufacturer(),
            summary: default_summary(),
            delimiter: default_delimiter(),
        }
    }
}

impl OutputConfig {
    /// `file` resolved against the output directory.
    #[must_use]
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}
