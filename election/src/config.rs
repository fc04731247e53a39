//! Service configuration with TOML file support.

use ballot_utils::LogFormat;
use ballot_work::WorkGenerator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ElectionError;

/// Configuration for an election service and the binary hosting it.
///
/// Loaded from a TOML file via [`ServiceConfig::from_toml_file`] or built
/// programmatically. Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Path of the JSON file holding the whole ledger state.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Threads used to search for block nonces. `1` seals on the calling thread.
    #[serde(default = "default_work_threads")]
    pub work_threads: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./ballot_data/chain_db.json")
}

fn default_work_threads() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServiceConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ElectionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ElectionError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ElectionError> {
        toml::from_str(s).map_err(|e| ElectionError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ElectionError> {
        toml::to_string_pretty(self).map_err(|e| ElectionError::Config(e.to_string()))
    }

    /// The nonce searcher described by `work_threads`.
    pub fn work_generator(&self) -> Result<WorkGenerator, ElectionError> {
        Ok(WorkGenerator::parallel(self.work_threads)?)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            work_threads: default_work_threads(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ServiceConfig::default();
        let parsed = ServiceConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config.data_file, PathBuf::from("./ballot_data/chain_db.json"));
        assert_eq!(config.work_threads, 1);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let config = ServiceConfig::from_toml_str(
            r#"
            data_file = "/var/lib/ballot/chain_db.json"
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/ballot/chain_db.json"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.work_threads, 1);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ServiceConfig::from_toml_str("work_threads = \"many\"").unwrap_err();
        assert!(matches!(err, ElectionError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ServiceConfig::from_toml_file("/nonexistent/ballot.toml").unwrap_err();
        assert!(matches!(err, ElectionError::Config(_)));
    }

    #[test]
    fn work_generator_follows_thread_count() {
        let config = ServiceConfig {
            work_threads: 2,
            ..Default::default()
        };
        assert_eq!(config.work_generator().unwrap().threads(), 2);
        assert_eq!(ServiceConfig::default().work_generator().unwrap().threads(), 1);
    }
}
