//! Layered settings: defaults, then an optional TOML file, then CLI flags.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use fee_core::ClientConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Every field is optional so a partial file, or a partial set of CLI flags,
/// only overrides what it names.
///
/// ```toml
/// api_url = "http://localhost:8080/api"
/// timeout_secs = 5
/// log_level = "info"
/// log_file = "fee-calculator.log"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `self` with every field `other` sets replaced by `other`'s.
    pub fn overlay(
        self,
        other: Settings,
    ) -> Settings {
        Settings {
            api_url: other.api_url.or(self.api_url),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            log_level: other.log_level.or(self.log_level),
            log_file: other.log_file.or(self.log_file),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: self.api_url.clone().unwrap_or(defaults.base_url),
            timeout: self
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        }
    }
}
