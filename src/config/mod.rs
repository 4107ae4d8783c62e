//! Configuration loading and management for the payroll engine.
//!
//! This module loads the engine configuration from a YAML file: the HTTP
//! bind address, the recalculation batch settings and the optional seed file
//! for the in-memory store.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll-engine.yaml").unwrap();
//! println!("Binding to {}", config.config().server.bind_address);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_PATH_ENV, ConfigLoader};
pub use types::{EngineConfig, RecalculationConfig, SeedConfig, ServerConfig};
