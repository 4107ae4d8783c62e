//! Persistence boundary for the payroll engine.
//!
//! The engine reaches storage only through [`PayrollStore`]. Implementations
//! must enforce the one-record-per-(employee, month, year) key and make
//! [`PayrollStore::replace_ledger_lines`] and
//! [`PayrollStore::commit_adjustments`] atomic.

mod legacy;
mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{
    AttendanceRecord, Employee, LedgerLine, NewPayrollRecord, PayrollRecord, PayrollUpdate,
};

pub use legacy::{LegacyAttendanceRow, LegacyEmployeeRow};
pub use memory::{InMemoryStore, SeedData};

/// Storage operations consumed by the payroll engine.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Fetches one employee.
    async fn get_employee(&self, id: &str) -> StoreResult<Employee>;

    /// Lists every employee.
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;

    /// Attendance for an employee between two dates, inclusive.
    async fn get_attendance(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Records for a period; fully paid records are skipped unless `include_paid`.
    async fn get_payroll_records(
        &self,
        month: u32,
        year: i32,
        include_paid: bool,
    ) -> StoreResult<Vec<PayrollRecord>>;

    /// Fetches a record by id.
    async fn get_payroll_record(&self, id: Uuid) -> StoreResult<PayrollRecord>;

    /// All records of an employee, newest period first.
    async fn get_payroll_records_by_employee(
        &self,
        employee_id: &str,
    ) -> StoreResult<Vec<PayrollRecord>>;

    /// Looks up the record for an employee and period, if any.
    async fn find_payroll_record(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> StoreResult<Option<PayrollRecord>>;

    /// Creates a record; fails with `Duplicate` if the key is taken.
    async fn create_payroll_record(&self, record: NewPayrollRecord) -> StoreResult<PayrollRecord>;

    /// Applies a partial update if the stored revision equals `expected_revision`.
    async fn update_payroll_record(
        &self,
        id: Uuid,
        expected_revision: u64,
        update: PayrollUpdate,
    ) -> StoreResult<PayrollRecord>;

    /// Deletes a record and its ledger lines.
    async fn delete_payroll_record(&self, id: Uuid) -> StoreResult<()>;

    /// Replaces every ledger line of a record in one step.
    async fn replace_ledger_lines(&self, payroll_id: Uuid, lines: Vec<LedgerLine>)
    -> StoreResult<()>;

    /// Updates totals and replaces ledger lines together, revision-checked.
    async fn commit_adjustments(
        &self,
        id: Uuid,
        expected_revision: u64,
        update: PayrollUpdate,
        lines: Vec<LedgerLine>,
    ) -> StoreResult<PayrollRecord>;

    /// Ledger lines of a record in insertion order.
    async fn ledger_lines(&self, payroll_id: Uuid) -> StoreResult<Vec<LedgerLine>>;
}
