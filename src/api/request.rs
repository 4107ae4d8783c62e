//! Request types for the payroll engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayPeriod, PaymentDetails};

/// Request body for `POST /payrolls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayrollRequest {
    /// The employee to create the record for.
    pub employee_id: String,
    /// Period month (1..=12).
    pub month: u32,
    /// Period year.
    pub year: i32,
}

impl CreatePayrollRequest {
    /// The validated period.
    pub fn period(&self) -> PayrollResult<PayPeriod> {
        PayPeriod::new(self.month, self.year)
    }
}

/// Query string for `GET /payrolls`.
///
/// Either `employee_id` or both `month` and `year` must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPayrollsQuery {
    /// Period month.
    pub month: Option<u32>,
    /// Period year.
    pub year: Option<i32>,
    /// Restrict to one employee's records.
    pub employee_id: Option<String>,
    /// Include fully paid records (default `true`).
    #[serde(default = "default_include_paid")]
    pub include_paid: bool,
}

fn default_include_paid() -> bool {
    true
}

impl ListPayrollsQuery {
    /// The requested period, if month and year were both given.
    pub fn period(&self) -> PayrollResult<Option<PayPeriod>> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => PayPeriod::new(month, year).map(Some),
            (None, None) => Ok(None),
            (month, year) => Err(PayrollError::InvalidPeriod {
                month: month.unwrap_or(0),
                year: year.unwrap_or(0),
            }),
        }
    }
}

/// Request body for `POST /payrolls/:id/adjustments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideAdjustmentsRequest {
    /// Replacement deductions total.
    pub deductions: Decimal,
    /// Replacement additions total.
    pub additions: Decimal,
}

/// Request body for `POST /payrolls/:id/payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Which flag to change: `"hand"` or `"bank"` (legacy names accepted).
    pub field: String,
    /// The new value of the flag.
    pub paid: bool,
    /// Optional payment method.
    #[serde(default)]
    pub method: Option<String>,
    /// Optional payment reference.
    #[serde(default)]
    pub reference: Option<String>,
}

impl PaymentRequest {
    /// Payment details, if either was supplied.
    pub fn details(&self) -> Option<PaymentDetails> {
        if self.method.is_none() && self.reference.is_none() {
            return None;
        }
        Some(PaymentDetails {
            method: self.method.clone(),
            reference: self.reference.clone(),
        })
    }
}

/// Request body naming the employees a period operation applies to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeIdsRequest {
    /// Employee ids.
    pub employee_ids: Vec<String>,
}

/// Request body for `POST /periods/:year/:month/bonus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusRequest {
    /// Employees receiving the bonus.
    pub employee_ids: Vec<String>,
    /// Flat bonus amount.
    pub amount: Decimal,
}
