//! Error types for the payroll engine.
//!
//! Two layers of errors exist: [`StoreError`] is produced by implementations
//! of the persistence boundary, and [`PayrollError`] is what every public
//! operation of the engine returns.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a [`PayrollStore`](crate::store::PayrollStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "employee", "payroll record").
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// A payroll record already exists for the employee and period.
    #[error("Payroll record already exists for employee '{employee_id}' in {month:02}/{year}")]
    Duplicate {
        /// The employee the record belongs to.
        employee_id: String,
        /// The period month.
        month: u32,
        /// The period year.
        year: i32,
    },

    /// The stored revision no longer matches the revision the caller read.
    #[error("Revision conflict on payroll record {id}: expected {expected}, found {actual}")]
    Conflict {
        /// The payroll record id.
        id: Uuid,
        /// The revision the caller expected.
        expected: u64,
        /// The revision currently stored.
        actual: u64,
    },

    /// The backing storage failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayrollError {
    /// The employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: String,
    },

    /// The payroll record does not exist.
    #[error("Payroll record not found: {id}")]
    PayrollRecordNotFound {
        /// The record id, or the employee/period key that was looked up.
        id: String,
    },

    /// A status field name that the tracker does not support.
    #[error("Invalid status field '{field}'")]
    InvalidField {
        /// The field name that was requested.
        field: String,
    },

    /// A month outside 1..=12.
    #[error("Invalid pay period {month}/{year}")]
    InvalidPeriod {
        /// The month that was supplied.
        month: u32,
        /// The year that was supplied.
        year: i32,
    },

    /// A monetary amount that must be non-negative was negative.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The field that was invalid.
        field: String,
        /// Why it was rejected.
        message: String,
    },

    /// Another writer updated the record between read and write.
    #[error("Concurrent modification of payroll record {id}")]
    Conflict {
        /// The record that was modified concurrently.
        id: Uuid,
    },

    /// The persistence collaborator failed.
    #[error("Persistence failure: {message}")]
    Persistence {
        /// A description of the underlying failure.
        message: String,
    },

    /// A report could not be written.
    #[error("Failed to export payroll report: {message}")]
    ExportFailed {
        /// A description of the writer failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl From<StoreError> for PayrollError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity: "employee", id } => {
                PayrollError::EmployeeNotFound { employee_id: id }
            }
            StoreError::NotFound { id, .. } => PayrollError::PayrollRecordNotFound { id },
            StoreError::Conflict { id, .. } => PayrollError::Conflict { id },
            other => PayrollError::Persistence {
                message: other.to_string(),
            },
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

/// A type alias for Results returned by store implementations.
pub type StoreResult<T> = Result<T, StoreError>;
