//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod ledger;
mod pay_period;
mod payment;
mod payroll_record;

pub use attendance::AttendanceRecord;
pub use employee::Employee;
pub use ledger::{AdjustmentType, LedgerLine};
pub use pay_period::PayPeriod;
pub use payment::{PaymentDetails, PaymentField, PaymentStatus};
pub use payroll_record::{NewPayrollRecord, PayrollRecord, PayrollUpdate};
