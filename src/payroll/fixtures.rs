//! Shared test fixtures for the service tests.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::PayrollService;
use crate::models::{AttendanceRecord, Employee, PayPeriod};
use crate::store::{InMemoryStore, PayrollStore, SeedData};

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub(crate) fn march() -> PayPeriod {
    PayPeriod::new(3, 2026).unwrap()
}

pub(crate) fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

pub(crate) fn employee(id: &str, base: &str, bank: &str, hand: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {}", id),
        location: "Centro".to_string(),
        is_active: true,
        base_salary: dec(base),
        bank_salary: dec(bank),
        hand_salary: dec(hand),
        has_attendance_bonus: false,
        attendance_bonus: Decimal::ZERO,
    }
}

/// The employee used by most scenarios: base 18000, bank 9000, hand 9000.
pub(crate) fn standard_employee(id: &str) -> Employee {
    employee(id, "18000", "9000", "9000")
}

pub(crate) fn absent(employee_id: &str, d: u32) -> AttendanceRecord {
    let mut record = AttendanceRecord::present(employee_id, day(d));
    record.is_absent = true;
    record
}

pub(crate) fn holiday_worked(employee_id: &str, d: u32) -> AttendanceRecord {
    let mut record = AttendanceRecord::present(employee_id, day(d));
    record.is_holiday = true;
    record
}

pub(crate) fn service_with(
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
) -> (PayrollService, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::from_seed(SeedData {
        employees,
        attendance,
    }));
    let dyn_store: Arc<dyn PayrollStore> = store.clone();
    (PayrollService::new(dyn_store), store)
}
