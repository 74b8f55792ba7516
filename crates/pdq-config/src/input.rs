//! Where the three source datasets are read from.

use std::path::PathBuf;

use pdq_core::TableKind;
use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_manufacturers() -> String {
    "manufacturers.csv".to_string()
}

fn default_descriptions() -> String {
    "product_descriptions.csv".to_string()
}

fn default_properties() -> String {
    "product_properties.csv".to_string()
}

const fn default_delimiter() -> char {
    ';'
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InputConfig {
    /// Directory holding the dataset files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_manufacturers")]
    pub manufacturers: String,

    #[serde(default = "default_descriptions")]
    pub descriptions: String,

    #[serde(default = "default_properties")]
    pub properties: String,

    /// Field delimiter of the dataset files. Must be ASCII.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            manufacturers: default_manufacturers(),
            descriptions: default_descriptions(),
            properties: default_properties(),
            delimiter: default_delimiter(),
        }
    }
}

impl InputConfig {
    /// File name configured for a dataset kind.
    #[must_use]
    pub fn file_name(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::Manufacturer => &self.manufacturers,
            TableKind::Description => &self.descriptions,
            TableKind::Property => &self.properties,
        }
    }

    /// Full path of the file for a dataset kind.
    #[must_use]
    pub fn path_for(&self, kind: TableKind) -> PathBuf {
        self.data_dir.join(self.file_name(kind))
    }
}
