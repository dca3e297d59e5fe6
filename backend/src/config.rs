//! Per-invocation settings copied into every output row.
//!
//! Defaults match the shop the tool was written for. At the boundary the
//! values can come from the environment (a `.env` file is honored) and the
//! CLI overrides whatever it is given explicitly.

use serde::Serialize;
use std::env::{self, VarError};

use crate::error::ConfigError;

pub const DEFAULT_MIN_LEVEL: &str = "1";
pub const DEFAULT_TAGS: &str = "Kallithea";
pub const DEFAULT_PRIMARY_FOLDER: &str = "Apparel";
pub const DEFAULT_SUBFOLDER_LEVEL1: &str = "Socks";
pub const DEFAULT_SUBFOLDER_LEVEL2: &str = "Grip Socks";

/// Environment variable prefix for [`Config::from_env`].
pub const ENV_PREFIX: &str = "SKULOAD_";

/// Settings for one transformation. Not validated; copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub min_level: String,
    pub tags: String,
    pub primary_folder: String,
    pub subfolder_level1: String,
    pub subfolder_level2: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_level: DEFAULT_MIN_LEVEL.to_string(),
            tags: DEFAULT_TAGS.to_string(),
            primary_folder: DEFAULT_PRIMARY_FOLDER.to_string(),
            subfolder_level1: DEFAULT_SUBFOLDER_LEVEL1.to_string(),
            subfolder_level2: DEFAULT_SUBFOLDER_LEVEL2.to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `SKULOAD_*` environment variables.
    ///
    /// Reads `SKULOAD_MIN_LEVEL`, `SKULOAD_TAGS`, `SKULOAD_PRIMARY_FOLDER`,
    /// `SKULOAD_SUBFOLDER_LEVEL1` and `SKULOAD_SUBFOLDER_LEVEL2`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(v) => Ok(Some(v)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key.to_string())),
        })
    }

    /// Defaults overlaid with whatever `lookup` returns for each
    /// `SKULOAD_*` key.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Result<Option<String>, ConfigError>,
    {
        let mut config = Self::default();
        let fields: [(&str, &mut String); 5] = [
            ("MIN_LEVEL", &mut config.min_level),
            ("TAGS", &mut config.tags),
            ("PRIMARY_FOLDER", &mut config.primary_folder),
            ("SUBFOLDER_LEVEL1", &mut config.subfolder_level1),
            ("SUBFOLDER_LEVEL2", &mut config.subfolder_level2),
        ];
        for (suffix, slot) in fields {
            let key = format!("{}{}", ENV_PREFIX, suffix);
            if let Some(value) = lookup(&key)? {
                *slot = value;
            }
        }
        Ok(config)
    }
}
