//! Per-(employee, period) mutual exclusion.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::PayPeriod;

/// Identifies the payroll record slot a lock protects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayrollKey {
    /// The employee.
    pub employee_id: String,
    /// The period.
    pub period: PayPeriod,
}

impl PayrollKey {
    /// Builds a key.
    pub fn new(employee_id: impl Into<String>, period: PayPeriod) -> Self {
        Self {
            employee_id: employee_id.into(),
            period,
        }
    }
}

/// A registry of async mutexes keyed by [`PayrollKey`].
///
/// Holding the guard returned by [`KeyLocks::lock`] serializes every
/// read-modify-write of that record within this process. Entries nobody holds
/// are dropped on the next acquisition.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<PayrollKey, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`.
    pub async fn lock(&self, key: PayrollKey) -> OwnedMutexGuard<()> {
        let slot = {
            let mut locks = self.locks.lock().await;
            locks.retain(|k, slot| *k == key || Arc::strong_count(slot) > 1);
            Arc::clone(locks.entry(key).or_default())
        };
        slot.lock_owned().await
    }

    /// Number of keys currently tracked.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Returns true if no keys are tracked.
    pub async fn is_empty(&self) -> bool {
        self.locks.lock().await.is_empty()
    }
}
