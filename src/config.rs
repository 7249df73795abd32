// Tue Jan 13 2026 - Alex

use crate::kernel::Algorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Workers for multi-pattern searches.
    pub worker_threads: usize,
    /// Forces a kernel. `None` picks the fastest one the CPU supports.
    pub algorithm: Option<Algorithm>,
    pub load_balance: bool,
    pub cache_duplicates: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
            algorithm: None,
            load_balance: false,
            cache_duplicates: false,
        }
    }
}

impl ScannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_load_balance(mut self, load_balance: bool) -> Self {
        self.load_balance = load_balance;
        self
    }

    pub fn with_cache_duplicates(mut self, cache_duplicates: bool) -> Self {
        self.cache_duplicates = cache_duplicates;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads == 0 {
            return Err(ConfigError::Invalid(
                "worker_threads must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The kernel single-pattern searches will actually run.
    pub fn effective_algorithm(&self) -> Algorithm {
        self.algorithm
            .map(Algorithm::resolve)
            .unwrap_or_else(Algorithm::best_available)
    }

    /// Whether multi-pattern searches need a pool of their own instead of
    /// rayon's global one.
    pub fn needs_dedicated_pool(&self) -> bool {
        self.worker_threads != rayon::current_num_threads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.worker_threads, num_cpus::get());
        assert_eq!(config.algorithm, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"algorithm": "compiled", "load_balance": true}"#;
        let config = ScannerConfig::from_json_str(json).unwrap();
        assert_eq!(config.algorithm, Some(Algorithm::Compiled));
        assert!(config.load_balance);
        assert!(!config.cache_duplicates);
        assert_eq!(config.worker_threads, num_cpus::get());
        assert_eq!(config.effective_algorithm(), Algorithm::Compiled);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = ScannerConfig::from_json_str(r#"{"worker_threads": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            ScannerConfig::from_json_str("{worker_threads"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ScannerConfig::from_json_str(r#"{"algorithm": "neon"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let config = ScannerConfig::new()
            .with_worker_threads(3)
            .with_algorithm(Algorithm::Simple)
            .with_cache_duplicates(true);

        let path = std::env::temp_dir().join(format!("sigscan-config-{}.json", std::process::id()));
        std::fs::write(&path, config.to_json().unwrap()).unwrap();
        let loaded = ScannerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
