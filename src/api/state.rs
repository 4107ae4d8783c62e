//! Application state for the payroll engine API.

use crate::payroll::PayrollService;

/// Shared application state.
///
/// Holds the payroll service; cloning shares the same store and lock registry.
#[derive(Clone)]
pub struct AppState {
    service: PayrollService,
}

impl AppState {
    /// Creates a new application state around a payroll service.
    pub fn new(service: PayrollService) -> Self {
        Self { service }
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
