use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LookupError, Result};

pub const DEFAULT_CONFIG: &str = "sr5-lookup.toml";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PROCESSED: &str = "sr5_data.json";
pub const DEFAULT_FLATTENED: &str = "sr5_data_flat.json";
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_INSPECT_COUNT: usize = 10;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub inspect: InspectConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_processed")]
    pub processed: PathBuf,
    #[serde(default = "default_flattened")]
    pub flattened: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            processed: default_processed(),
            flattened: default_flattened(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InspectConfig {
    #[serde(default = "default_inspect_count")]
    pub count: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_INSPECT_COUNT,
        }
    }
}

impl LookupConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| LookupError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_processed() -> PathBuf {
    PathBuf::from(DEFAULT_PROCESSED)
}

fn default_flattened() -> PathBuf {
    PathBuf::from(DEFAULT_FLATTENED)
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_inspect_count() -> usize {
    DEFAULT_INSPECT_COUNT
}
