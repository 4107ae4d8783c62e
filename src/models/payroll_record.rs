//! Payroll record model and its partial-update companion.
//!
//! A [`PayrollRecord`] is the computed compensation row for one employee in
//! one [`PayPeriod`]. Stores create it from a [`NewPayrollRecord`] and mutate
//! it through [`PayrollUpdate`], which carries only the fields to change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, PaymentStatus};

/// The per-employee, per-period payroll row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier of the record.
    pub id: Uuid,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// Employee name at the time the record was created.
    pub employee_name: String,
    /// Employee location at the time the record was created.
    pub location: String,
    /// Period month.
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Bank portion.
    pub bank_salary: Decimal,
    /// Cash portion before adjustments.
    pub hand_salary: Decimal,
    /// Total attendance deductions, rounded to cents.
    pub deductions: Decimal,
    /// Total attendance additions, rounded to cents.
    pub additions: Decimal,
    /// `round2(hand_salary - deductions + additions)`.
    pub final_hand_salary: Decimal,
    /// `base_salary + bank_salary + attendance_bonus`.
    pub total_salary: Decimal,
    /// Whether the attendance bonus applies this period.
    pub has_attendance_bonus: bool,
    /// The bonus amount counted into `total_salary`.
    pub attendance_bonus: Decimal,
    /// Cash portion handed over.
    pub is_paid_hand: bool,
    /// Bank portion transferred.
    pub is_paid_bank: bool,
    /// When the cash portion was marked paid.
    pub paid_hand_at: Option<DateTime<Utc>>,
    /// When the bank portion was marked paid.
    pub paid_bank_at: Option<DateTime<Utc>>,
    /// Free-form payment method.
    pub payment_method: Option<String>,
    /// Free-form payment reference.
    pub payment_reference: Option<String>,
    /// Incremented by the store on every update.
    pub revision: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// The period this record covers.
    pub fn period(&self) -> PayPeriod {
        PayPeriod {
            year: self.year,
            month: self.month,
        }
    }

    /// Composite payment status derived from the two flags.
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::from_flags(self.is_paid_hand, self.is_paid_bank)
    }

    /// True once both portions are paid.
    pub fn is_fully_paid(&self) -> bool {
        self.is_paid_hand && self.is_paid_bank
    }

    /// Applies a partial update in place. Revision and timestamps are left to the store.
    pub fn apply_update(&mut self, update: &PayrollUpdate) {
        if let Some(value) = update.base_salary {
            self.base_salary = value;
        }
        if let Some(value) = update.bank_salary {
            self.bank_salary = value;
        }
        if let Some(value) = update.hand_salary {
            self.hand_salary = value;
        }
        if let Some(value) = update.deductions {
            self.deductions = value;
        }
        if let Some(value) = update.additions {
            self.additions = value;
        }
        if let Some(value) = update.final_hand_salary {
            self.final_hand_salary = value;
        }
        if let Some(value) = update.total_salary {
            self.total_salary = value;
        }
        if let Some(value) = update.has_attendance_bonus {
            self.has_attendance_bonus = value;
        }
        if let Some(value) = update.attendance_bonus {
            self.attendance_bonus = value;
        }
        if let Some(value) = update.is_paid_hand {
            self.is_paid_hand = value;
        }
        if let Some(value) = update.is_paid_bank {
            self.is_paid_bank = value;
        }
        if let Some(value) = update.paid_hand_at {
            self.paid_hand_at = value;
        }
        if let Some(value) = update.paid_bank_at {
            self.paid_bank_at = value;
        }
        if let Some(value) = &update.payment_method {
            self.payment_method = value.clone();
        }
        if let Some(value) = &update.payment_reference {
            self.payment_reference = value.clone();
        }
    }
}

/// Fields needed to create a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayrollRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// Employee name snapshot.
    pub employee_name: String,
    /// Employee location snapshot.
    pub location: String,
    /// Period month.
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Bank portion.
    pub bank_salary: Decimal,
    /// Cash portion.
    pub hand_salary: Decimal,
    /// Initial deductions.
    pub deductions: Decimal,
    /// Initial additions.
    pub additions: Decimal,
    /// Initial final hand salary.
    pub final_hand_salary: Decimal,
    /// Initial total salary.
    pub total_salary: Decimal,
    /// Whether the bonus applies.
    pub has_attendance_bonus: bool,
    /// The bonus amount.
    pub attendance_bonus: Decimal,
}

impl NewPayrollRecord {
    /// Materializes a stored record with a fresh id at revision 0.
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> PayrollRecord {
        PayrollRecord {
            id,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            location: self.location,
            month: self.month,
            year: self.year,
            base_salary: self.base_salary,
            bank_salary: self.bank_salary,
            hand_salary: self.hand_salary,
            deductions: self.deductions,
            additions: self.additions,
            final_hand_salary: self.final_hand_salary,
            total_salary: self.total_salary,
            has_attendance_bonus: self.has_attendance_bonus,
            attendance_bonus: self.attendance_bonus,
            is_paid_hand: false,
            is_paid_bank: false,
            paid_hand_at: None,
            paid_bank_at: None,
            payment_method: None,
            payment_reference: None,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update; `None` leaves the field unchanged.
///
/// Nullable fields use `Option<Option<_>>` so they can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollUpdate {
    /// New `base_salary`.
    pub base_salary: Option<Decimal>,
    /// New `bank_salary`.
    pub bank_salary: Option<Decimal>,
    /// New `hand_salary`.
    pub hand_salary: Option<Decimal>,
    /// New `deductions`.
    pub deductions: Option<Decimal>,
    /// New `additions`.
    pub additions: Option<Decimal>,
    /// New `final_hand_salary`.
    pub final_hand_salary: Option<Decimal>,
    /// New `total_salary`.
    pub total_salary: Option<Decimal>,
    /// New `has_attendance_bonus`.
    pub has_attendance_bonus: Option<bool>,
    /// New `attendance_bonus`.
    pub attendance_bonus: Option<Decimal>,
    /// New `is_paid_hand`.
    pub is_paid_hand: Option<bool>,
    /// New `is_paid_bank`.
    pub is_paid_bank: Option<bool>,
    /// New `paid_hand_at`.
    pub paid_hand_at: Option<Option<DateTime<Utc>>>,
    /// New `paid_bank_at`.
    pub paid_bank_at: Option<Option<DateTime<Utc>>>,
    /// New `payment_method`.
    pub payment_method: Option<Option<String>>,
    /// New `payment_reference`.
    pub payment_reference: Option<Option<String>>,
}
