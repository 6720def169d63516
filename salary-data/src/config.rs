//! TOML tax configuration.
//!
//! ## File Format
//!
//! Amounts and rates are written as strings so they keep their exact decimal
//! value. A slab without `upper_bound` is unbounded and must come last.
//!
//! ```toml
//! cess_rate = "0.04"
//! standard_deduction = "50000"
//!
//! [old]
//! rebate_limit = "500000"
//!
//! [[old.slabs]]
//! upper_bound = "250000"
//! rate = "0"
//!
//! [[old.slabs]]
//! rate = "0.30"
//!
//! [new]
//! rebate_limit = "700000"
//!
//! [[new.slabs]]
//! rate = "0.10"
//! ```

use std::path::{Path, PathBuf};

use salary_core::{ConfigError, TaxConfig, TaxRegime};
use thiserror::Error;
use tracing::debug;

/// The configuration shipped with the workspace.
pub const DEFAULT_TAX_CONFIG: &str = include_str!("../data/default_tax_config.toml");

/// Errors raised while loading or building a [`TaxConfig`].
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown regime '{value}' on row {row}")]
    UnknownRegime { value: String, row: usize },

    #[error("no slabs given for the {0} regime")]
    MissingRegime(TaxRegime),

    #[error("invalid {regime} slab table: {source}")]
    InvalidSlabs {
        regime: TaxRegime,
        #[source]
        source: ConfigError,
    },

    #[error("invalid tax configuration: {0}")]
    Invalid(#[from] ConfigError),
}

impl From<csv::Error> for ConfigLoadError {
    fn from(err: csv::Error) -> Self {
        ConfigLoadError::CsvParse(err.to_string())
    }
}

/// Parses and validates a TOML configuration document.
pub fn parse_tax_config(input: &str) -> Result<TaxConfig, ConfigLoadError> {
    let config: TaxConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates the TOML configuration at `path`.
pub fn load_tax_config(path: &Path) -> Result<TaxConfig, ConfigLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_tax_config(&contents)?;
    debug!(path = %path.display(), "loaded tax configuration");
    Ok(config)
}

/// The bundled configuration ([`DEFAULT_TAX_CONFIG`]).
pub fn default_tax_config() -> Result<TaxConfig, ConfigLoadError> {
    parse_tax_config(DEFAULT_TAX_CONFIG)
}

pub fn to_toml_string(config: &TaxConfig) -> Result<String, ConfigLoadError> {
    Ok(toml::to_string_pretty(config)?)
}
