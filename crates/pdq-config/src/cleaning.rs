//! Normalizer settings.

use pdq_core::DEFAULT_BAD_VALUES;
use serde::{Deserialize, Serialize};

fn default_bad_values() -> Vec<String> {
    DEFAULT_BAD_VALUES.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CleaningConfig {
    /// Cell values treated as "no value". Replaces the default list entirely.
    #[serde(default = "default_bad_values")]
    pub bad_values: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            bad_values: default_bad_values(),
        }
    }
}
