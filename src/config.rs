//! YAML configuration.
//!
//! ```yaml
//! paths:
//!   raw_data: data/raw
//!   ingested_data: data/ingested/deliveries.parquet
//!   preprocessed_data: data/preprocessed/deliveries.parquet
//!   log_file: logs/howzat.log
//! preprocess:
//!   cutoff_year: 2015   # optional
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PipelineResult;
use crate::processing::DEFAULT_CUTOFF_YEAR;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/settings.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    /// Directory of raw match documents.
    pub raw_data: PathBuf,
    /// Parquet file written by `ingest`.
    pub ingested_data: PathBuf,
    /// Parquet file written by `preprocess`.
    pub preprocessed_data: PathBuf,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreprocessConfig {
    #[serde(default = "default_cutoff_year")]
    pub cutoff_year: i32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            cutoff_year: DEFAULT_CUTOFF_YEAR,
        }
    }
}

fn default_cutoff_year() -> i32 {
    DEFAULT_CUTOFF_YEAR
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(input: &str) -> PipelineResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }
}
