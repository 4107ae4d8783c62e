//! In-memory [`PayrollStore`] used by tests and the demo server.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::PayrollStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    AttendanceRecord, Employee, LedgerLine, NewPayrollRecord, PayrollRecord, PayrollUpdate,
};

type RecordKey = (String, u32, i32);

/// Initial contents for an [`InMemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Employees to load.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Attendance records to load.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Default)]
struct Inner {
    employees: HashMap<String, Employee>,
    attendance: HashMap<String, Vec<AttendanceRecord>>,
    records: HashMap<Uuid, PayrollRecord>,
    keys: HashMap<RecordKey, Uuid>,
    ledger: HashMap<Uuid, Vec<LedgerLine>>,
    failing_attendance: HashSet<String>,
}

impl Inner {
    fn record(&self, id: Uuid) -> StoreResult<&PayrollRecord> {
        self.records.get(&id).ok_or_else(|| record_not_found(id))
    }

    fn update(
        &mut self,
        id: Uuid,
        expected_revision: u64,
        update: &PayrollUpdate,
    ) -> StoreResult<PayrollRecord> {
        let record = self.records.get_mut(&id).ok_or_else(|| record_not_found(id))?;
        if record.revision != expected_revision {
            return Err(StoreError::Conflict {
                id,
                expected: expected_revision,
                actual: record.revision,
            });
        }
        record.apply_update(update);
        record.revision += 1;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

fn record_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound {
        entity: "payroll record",
        id: id.to_string(),
    }
}

/// A store that keeps everything in process memory behind one lock.
///
/// Every trait method takes the lock once, so the multi-part operations
/// (`commit_adjustments`, `replace_ledger_lines`, `delete_payroll_record`) are
/// atomic with respect to other callers.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with employees and attendance.
    pub fn from_seed(seed: SeedData) -> Self {
        let mut inner = Inner::default();
        for employee in seed.employees {
            inner.employees.insert(employee.id.clone(), employee);
        }
        for record in seed.attendance {
            inner
                .attendance
                .entry(record.employee_id.clone())
                .or_default()
                .push(record);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Inserts or replaces an employee.
    pub async fn upsert_employee(&self, employee: Employee) {
        self.inner
            .write()
            .await
            .employees
            .insert(employee.id.clone(), employee);
    }

    /// Removes an employee, leaving their payroll records in place.
    pub async fn remove_employee(&self, id: &str) {
        self.inner.write().await.employees.remove(id);
    }

    /// Inserts an attendance record, replacing any record for the same day.
    pub async fn upsert_attendance(&self, record: AttendanceRecord) {
        let mut inner = self.inner.write().await;
        let days = inner
            .attendance
            .entry(record.employee_id.clone())
            .or_default();
        days.retain(|r| r.date != record.date);
        days.push(record);
    }

    /// Makes attendance reads for an employee fail with a backend error.
    pub async fn fail_attendance_for(&self, employee_id: &str) {
        self.inner
            .write()
            .await
            .failing_attendance
            .insert(employee_id.to_string());
    }
}

#[async_trait]
impl PayrollStore for InMemoryStore {
    async fn get_employee(&self, id: &str) -> StoreResult<Employee> {
        self.inner
            .read()
            .await
            .employees
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "employee",
                id: id.to_string(),
            })
    }

    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let mut employees: Vec<Employee> =
            self.inner.read().await.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }

    async fn get_attendance(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let inner = self.inner.read().await;
        if inner.failing_attendance.contains(employee_id) {
            return Err(StoreError::Backend(format!(
                "attendance unavailable for {}",
                employee_id
            )));
        }
        let mut records: Vec<AttendanceRecord> = inner
            .attendance
            .get(employee_id)
            .map(|days| {
                days.iter()
                    .filter(|r| r.date >= start && r.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn get_payroll_records(
        &self,
        month: u32,
        year: i32,
        include_paid: bool,
    ) -> StoreResult<Vec<PayrollRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<PayrollRecord> = inner
            .records
            .values()
            .filter(|r| r.month == month && r.year == year)
            .filter(|r| include_paid || !r.is_fully_paid())
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.employee_name
                .cmp(&b.employee_name)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(records)
    }

    async fn get_payroll_record(&self, id: Uuid) -> StoreResult<PayrollRecord> {
        self.inner.read().await.record(id).cloned()
    }

    async fn get_payroll_records_by_employee(
        &self,
        employee_id: &str,
    ) -> StoreResult<Vec<PayrollRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<PayrollRecord> = inner
            .records
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        Ok(records)
    }

    async fn find_payroll_record(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> StoreResult<Option<PayrollRecord>> {
        let inner = self.inner.read().await;
        let key = (employee_id.to_string(), month, year);
        Ok(inner
            .keys
            .get(&key)
            .and_then(|id| inner.records.get(id))
            .cloned())
    }

    async fn create_payroll_record(&self, record: NewPayrollRecord) -> StoreResult<PayrollRecord> {
        let mut inner = self.inner.write().await;
        let key = (record.employee_id.clone(), record.month, record.year);
        if inner.keys.contains_key(&key) {
            return Err(StoreError::Duplicate {
                employee_id: record.employee_id,
                month: record.month,
                year: record.year,
            });
        }

        let id = Uuid::new_v4();
        let record = record.into_record(id, Utc::now());
        inner.keys.insert(key, id);
        inner.records.insert(id, record.clone());
        debug!(record_id = %id, employee_id = %record.employee_id, "Created payroll record");
        Ok(record)
    }

    async fn update_payroll_record(
        &self,
        id: Uuid,
        expected_revision: u64,
        update: PayrollUpdate,
    ) -> StoreResult<PayrollRecord> {
        self.inner
            .write()
            .await
            .update(id, expected_revision, &update)
    }

    async fn delete_payroll_record(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let record = inner.records.remove(&id).ok_or_else(|| record_not_found(id))?;
        inner
            .keys
            .remove(&(record.employee_id, record.month, record.year));
        inner.ledger.remove(&id);
        Ok(())
    }

    async fn replace_ledger_lines(
        &self,
        payroll_id: Uuid,
        lines: Vec<LedgerLine>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.record(payroll_id)?;
        inner.ledger.insert(payroll_id, lines);
        Ok(())
    }

    async fn commit_adjustments(
        &self,
        id: Uuid,
        expected_revision: u64,
        update: PayrollUpdate,
        lines: Vec<LedgerLine>,
    ) -> StoreResult<PayrollRecord> {
        let mut inner = self.inner.write().await;
        let record = inner.update(id, expected_revision, &update)?;
        inner.ledger.insert(id, lines);
        Ok(record)
    }

    async fn ledger_lines(&self, payroll_id: Uuid) -> StoreResult<Vec<LedgerLine>> {
        let inner = self.inner.read().await;
        inner.record(payroll_id)?;
        Ok(inner.ledger.get(&payroll_id).cloned().unwrap_or_default())
    }
}
