use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::error::{AnalysisError, Result};
use crate::utils::constants::{
    ANNUAL_PERIOD, COMMODITY_COLUMN, CROPLAND_FILE, CROP_PRICES_FILE, DEFAULT_BASE_YEAR,
    DEFAULT_CONFIG_FILE, DEFAULT_DELIMITER, ENV_PREFIX, INDEX_PRICING_FILE, STATE_COLUMN,
};

fn validate_path(path: &PathBuf) -> std::result::Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("empty_path"));
    }
    Ok(())
}

/// A dataset analysed per group (State, Commodity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GroupedSource {
    #[validate(custom(function = "validate_path"))]
    pub path: PathBuf,

    #[validate(length(min = 1))]
    pub group_column: String,
}

/// The price index dataset, restricted to one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IndexSource {
    #[validate(custom(function = "validate_path"))]
    pub path: PathBuf,

    #[validate(length(min = 1))]
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,

    #[validate(nested)]
    pub cropland: GroupedSource,

    #[validate(nested)]
    pub crop_prices: GroupedSource,

    #[validate(nested)]
    pub index_pricing: IndexSource,

    #[validate(range(min = 1900, max = 2100))]
    pub base_year: i32,

    #[validate(length(equal = 1))]
    pub delimiter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            cropland: GroupedSource {
                path: PathBuf::from(CROPLAND_FILE),
                group_column: STATE_COLUMN.to_string(),
            },
            crop_prices: GroupedSource {
                path: PathBuf::from(CROP_PRICES_FILE),
                group_column: COMMODITY_COLUMN.to_string(),
            },
            index_pricing: IndexSource {
                path: PathBuf::from(INDEX_PRICING_FILE),
                period: ANNUAL_PERIOD.to_string(),
            },
            base_year: DEFAULT_BASE_YEAR,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Layer defaults, a config file and `AGDATA_*` environment variables.
    ///
    /// Without an explicit `path`, `agdata.toml` in the working directory is
    /// read when present. Nested keys use `__`, e.g. `AGDATA_CROPLAND__PATH`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config: DashboardConfig = Config::builder()
            .set_default("data_dir", defaults.data_dir.display().to_string())?
            .set_default("cropland.path", CROPLAND_FILE)?
            .set_default("cropland.group_column", STATE_COLUMN)?
            .set_default("crop_prices.path", CROP_PRICES_FILE)?
            .set_default("crop_prices.group_column", COMMODITY_COLUMN)?
            .set_default("index_pricing.path", INDEX_PRICING_FILE)?
            .set_default("index_pricing.period", ANNUAL_PERIOD)?
            .set_default("base_year", i64::from(DEFAULT_BASE_YEAR))?
            .set_default("delimiter", defaults.delimiter)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Source path resolved against `data_dir`
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.data_dir.join(path)
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(AnalysisError::InvalidFormat(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}
