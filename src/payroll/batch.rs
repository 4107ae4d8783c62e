//! Structured results for best-effort batch operations.

use serde::Serialize;

use crate::models::PayrollRecord;

/// One employee that a batch operation could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// The employee that was skipped.
    pub employee_id: String,
    /// Why it was skipped.
    pub reason: String,
}

/// The outcome of a batch: every success and every failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// Records that were processed.
    pub succeeded: Vec<PayrollRecord>,
    /// Employees that were skipped.
    pub failed: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Records a failure.
    pub fn fail(&mut self, employee_id: impl Into<String>, reason: impl ToString) {
        self.failed.push(BatchFailure {
            employee_id: employee_id.into(),
            reason: reason.to_string(),
        });
    }

    /// True when nothing failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;

    #[test]
    fn test_fail_records_reason_text() {
        let mut outcome = BatchOutcome::default();
        assert!(outcome.is_complete());

        outcome.fail(
            "emp_009",
            PayrollError::EmployeeNotFound {
                employee_id: "emp_009".to_string(),
            },
        );

        assert!(!outcome.is_complete());
        assert_eq!(outcome.failed[0].employee_id, "emp_009");
        assert_eq!(outcome.failed[0].reason, "Employee not found: emp_009");
    }
}
