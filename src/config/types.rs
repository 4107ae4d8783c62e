//! Configuration types for the payroll engine.
//!
//! These structures are deserialized from a YAML file. Every section has
//! defaults, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address the API listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Settings for the period-wide recalculation batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecalculationConfig {
    /// Whether fully paid records are recomputed too.
    #[serde(default = "default_include_paid")]
    pub include_paid: bool,
}

fn default_include_paid() -> bool {
    true
}

impl Default for RecalculationConfig {
    fn default() -> Self {
        Self {
            include_paid: default_include_paid(),
        }
    }
}

/// Where the demo server loads its initial employees and attendance from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    /// JSON file of legacy employee and attendance rows.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Recalculation batch settings.
    #[serde(default)]
    pub recalculation: RecalculationConfig,
    /// Seed data settings.
    #[serde(default)]
    pub seed: SeedConfig,
}
