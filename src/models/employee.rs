//! Employee model.
//!
//! Employees are read-only to the payroll engine; their salary figures seed
//! new payroll records and are re-read on forced regeneration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee whose payroll is computed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, copied onto payroll records for reporting.
    pub name: String,
    /// The business location the employee works at.
    #[serde(default)]
    pub location: String,
    /// Whether the employee takes part in payroll generation.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Monthly base salary; all attendance rates derive from this figure.
    pub base_salary: Decimal,
    /// Portion of pay transferred through the bank.
    pub bank_salary: Decimal,
    /// Portion of pay handed over in cash, subject to attendance adjustments.
    pub hand_salary: Decimal,
    /// Whether the employee currently qualifies for the attendance bonus.
    #[serde(default)]
    pub has_attendance_bonus: bool,
    /// The flat attendance bonus amount.
    #[serde(default)]
    pub attendance_bonus: Decimal,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns the bonus that applies to a fresh payroll record.
    ///
    /// The amount only counts when the bonus flag is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana".to_string(),
    ///     location: "Centro".to_string(),
    ///     is_active: true,
    ///     base_salary: Decimal::new(18000, 0),
    ///     bank_salary: Decimal::new(9000, 0),
    ///     hand_salary: Decimal::new(9000, 0),
    ///     has_attendance_bonus: false,
    ///     attendance_bonus: Decimal::new(500, 0),
    /// };
    /// assert_eq!(employee.effective_attendance_bonus(), Decimal::ZERO);
    /// ```
    pub fn effective_attendance_bonus(&self) -> Decimal {
        if self.has_attendance_bonus {
            self.attendance_bonus
        } else {
            Decimal::ZERO
        }
    }
}
