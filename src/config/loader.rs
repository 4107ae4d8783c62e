//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file and the seed data it points at.

use std::env;
use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};
use crate::store::SeedData;

use super::types::EngineConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PAYROLL_ENGINE_CONFIG";

/// Loads and provides access to the engine configuration.
///
/// # File Structure
///
/// ```text
/// server:
///   bind_address: "127.0.0.1:8080"
/// recalculation:
///   include_paid: true
/// seed:
///   path: config/seed.json
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll-engine.yaml").unwrap();
/// println!("Listening on {}", loader.config().server.bind_address);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let config = Self::load_yaml::<EngineConfig>(path.as_ref())?;
        Ok(Self { config })
    }

    /// Loads from the file named by `PAYROLL_ENGINE_CONFIG`, or uses defaults when unset.
    pub fn from_env() -> PayrollResult<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reads the seed file named in the configuration, if any.
    ///
    /// Relative seed paths are resolved against the working directory.
    pub fn load_seed(&self) -> PayrollResult<Option<SeedData>> {
        let Some(path) = &self.config.seed.path else {
            return Ok(None);
        };
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        SeedData::from_legacy_json(&content)
            .map(Some)
            .map_err(|e| PayrollError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })
    }
}
