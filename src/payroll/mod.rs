//! Payroll record orchestration.
//!
//! [`PayrollService`] owns the store handle and the per-record lock registry.
//! Its operations are split by concern:
//!
//! - `orchestrator`: record creation, recalculation and regeneration
//! - `bonus`: the flat attendance bonus
//! - `status`: hand and bank payment flags

mod batch;
mod bonus;
#[cfg(test)]
mod fixtures;
mod locks;
mod orchestrator;
mod status;

use std::sync::Arc;

use crate::config::RecalculationConfig;
use crate::store::PayrollStore;

pub use batch::{BatchFailure, BatchOutcome};
pub use locks::{KeyLocks, PayrollKey};

/// Entry point for every payroll operation.
///
/// Cloning is cheap; clones share the store and the lock registry.
#[derive(Clone)]
pub struct PayrollService {
    store: Arc<dyn PayrollStore>,
    locks: Arc<KeyLocks>,
    settings: RecalculationConfig,
}

impl PayrollService {
    /// Creates a service with default recalculation settings.
    pub fn new(store: Arc<dyn PayrollStore>) -> Self {
        Self::with_settings(store, RecalculationConfig::default())
    }

    /// Creates a service with explicit recalculation settings.
    pub fn with_settings(store: Arc<dyn PayrollStore>, settings: RecalculationConfig) -> Self {
        Self {
            store,
            locks: Arc::new(KeyLocks::new()),
            settings,
        }
    }
}
