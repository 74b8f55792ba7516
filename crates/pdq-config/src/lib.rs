//! # pdq-config
//!
//! Layered configuration loading for pdq using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PDQ_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.pdq/config.toml`
//! 4. User-level `~/.config/pdq/config.toml`
//! 5. Built-in defaults
//!
//! `PDQ_INPUT__DELIMITER=,` maps to `input.delimiter`, `PDQ_LAKE__PATH` to
//! `lake.path`, and so on.
//!
//! ```no_run
//! use pdq_config::PdqConfig;
//!
//! let config = PdqConfig::load_with_dotenv(None).expect("config");
//! println!("reading from {}", config.input.data_dir.display());
//! ```

mod cleaning;
mod error;
mod input;
mod lake;
mod output;

pub use cleaning::CleaningConfig;
pub use error::ConfigError;
pub use input::InputConfig;
pub use lake::LakeConfig;
pub use output::OutputConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PdqConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub lake: LakeConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
}

impl PdqConfig {
    /// Load and validate configuration from all sources.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] on a malformed source and
    /// [`ConfigError::InvalidValue`] if validation fails.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or layer more providers.
    #[must_use]
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".pdq/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed("PDQ_").split("__"))
    }

    /// Reject settings the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-ASCII delimiter or an
    /// empty bad-value list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ascii_delimiter("input.delimiter", self.input.delimiter)?;
        ascii_delimiter("output.delimiter", self.output.delimiter)?;
        if self.cleaning.bad_values.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "cleaning.bad_values".to_string(),
                reason: "at least one token is required".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pdq").join("config.toml"))
    }
}

/// The delimiter as a single byte, as the CSV reader and writer need it.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if `delimiter` is not ASCII.
pub fn ascii_delimiter(field: &str, delimiter: char) -> Result<u8, ConfigError> {
    if !delimiter.is_ascii() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("delimiter {delimiter:?} is not an ASCII character"),
        });
    }
    u8::try_from(delimiter).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: e.to_string(),
    })
}
