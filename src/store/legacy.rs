//! Normalizing adapter for rows exported by the legacy dashboard.
//!
//! Legacy rows may carry each field twice, once in snake_case and once in
//! camelCase, with either copy possibly null. The snake_case value wins and
//! the camelCase value is the fallback. Everything past this module works on
//! the canonical models only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::SeedData;
use crate::error::{StoreError, StoreResult};
use crate::models::{AttendanceRecord, Employee};

fn pick<T>(snake: Option<T>, camel: Option<T>) -> Option<T> {
    snake.or(camel)
}

fn required<T>(value: Option<T>, field: &str) -> StoreResult<T> {
    value.ok_or_else(|| StoreError::Backend(format!("legacy row is missing '{}'", field)))
}

/// An employee row as stored by the legacy dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyEmployeeRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default, rename = "isActive")]
    is_active_camel: Option<bool>,
    #[serde(default)]
    base_salary: Option<Decimal>,
    #[serde(default, rename = "baseSalary")]
    base_salary_camel: Option<Decimal>,
    #[serde(default)]
    bank_salary: Option<Decimal>,
    #[serde(default, rename = "bankSalary")]
    bank_salary_camel: Option<Decimal>,
    #[serde(default)]
    hand_salary: Option<Decimal>,
    #[serde(default, rename = "handSalary")]
    hand_salary_camel: Option<Decimal>,
    #[serde(default)]
    has_attendance_bonus: Option<bool>,
    #[serde(default, rename = "hasAttendanceBonus")]
    has_attendance_bonus_camel: Option<bool>,
    #[serde(default)]
    attendance_bonus: Option<Decimal>,
    #[serde(default, rename = "attendanceBonus")]
    attendance_bonus_camel: Option<Decimal>,
}

impl LegacyEmployeeRow {
    /// Resolves both spellings into a canonical [`Employee`].
    ///
    /// Missing monetary fields default to zero; a missing id is an error.
    pub fn normalize(self) -> StoreResult<Employee> {
        let id = required(self.id, "id")?;
        Ok(Employee {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            location: self.location.unwrap_or_default(),
            is_active: pick(self.is_active, self.is_active_camel).unwrap_or(true),
            base_salary: pick(self.base_salary, self.base_salary_camel).unwrap_or_default(),
            bank_salary: pick(self.bank_salary, self.bank_salary_camel).unwrap_or_default(),
            hand_salary: pick(self.hand_salary, self.hand_salary_camel).unwrap_or_default(),
            has_attendance_bonus: pick(self.has_attendance_bonus, self.has_attendance_bonus_camel)
                .unwrap_or(false),
            attendance_bonus: pick(self.attendance_bonus, self.attendance_bonus_camel)
                .unwrap_or_default(),
        })
    }
}

/// An attendance row as stored by the legacy dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyAttendanceRow {
    #[serde(default)]
    employee_id: Option<String>,
    #[serde(default, rename = "employeeId")]
    employee_id_camel: Option<String>,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    is_absent: Option<bool>,
    #[serde(default, rename = "isAbsent")]
    is_absent_camel: Option<bool>,
    #[serde(default)]
    is_justified: Option<bool>,
    #[serde(default, rename = "isJustified")]
    is_justified_camel: Option<bool>,
    #[serde(default)]
    is_holiday: Option<bool>,
    #[serde(default, rename = "isHoliday")]
    is_holiday_camel: Option<bool>,
    #[serde(default)]
    late_minutes: Option<u32>,
    #[serde(default, rename = "lateMinutes")]
    late_minutes_camel: Option<u32>,
    #[serde(default)]
    early_departure_minutes: Option<u32>,
    #[serde(default, rename = "earlyDepartureMinutes")]
    early_departure_minutes_camel: Option<u32>,
    #[serde(default)]
    extra_minutes: Option<u32>,
    #[serde(default, rename = "extraMinutes")]
    extra_minutes_camel: Option<u32>,
}

impl LegacyAttendanceRow {
    /// Resolves both spellings into a canonical [`AttendanceRecord`].
    pub fn normalize(self) -> StoreResult<AttendanceRecord> {
        Ok(AttendanceRecord {
            employee_id: required(pick(self.employee_id, self.employee_id_camel), "employee_id")?,
            date: required(self.date, "date")?,
            is_absent: pick(self.is_absent, self.is_absent_camel).unwrap_or(false),
            is_justified: pick(self.is_justified, self.is_justified_camel).unwrap_or(false),
            is_holiday: pick(self.is_holiday, self.is_holiday_camel).unwrap_or(false),
            late_minutes: pick(self.late_minutes, self.late_minutes_camel).unwrap_or(0),
            early_departure_minutes: pick(
                self.early_departure_minutes,
                self.early_departure_minutes_camel,
            )
            .unwrap_or(0),
            extra_minutes: pick(self.extra_minutes, self.extra_minutes_camel).unwrap_or(0),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct LegacySeed {
    #[serde(default)]
    employees: Vec<LegacyEmployeeRow>,
    #[serde(default)]
    attendance: Vec<LegacyAttendanceRow>,
}

impl SeedData {
    /// Parses a JSON export of legacy rows into canonical seed data.
    ///
    /// ```
    /// use payroll_engine::store::SeedData;
    ///
    /// let json = r#"{
    ///     "employees": [{"id": "emp_001", "baseSalary": 18000, "bank_salary": "9000", "handSalary": 9000}],
    ///     "attendance": [{"employeeId": "emp_001", "date": "2026-03-02", "isAbsent": true}]
    /// }"#;
    /// let seed = SeedData::from_legacy_json(json).unwrap();
    /// assert_eq!(seed.employees[0].base_salary.to_string(), "18000");
    /// assert!(seed.attendance[0].is_absent);
    /// ```
    pub fn from_legacy_json(json: &str) -> StoreResult<Self> {
        let raw: LegacySeed = serde_json::from_str(json)
            .map_err(|e| StoreError::Backend(format!("invalid seed data: {}", e)))?;
        Ok(Self {
            employees: raw
                .employees
                .into_iter()
                .map(LegacyEmployeeRow::normalize)
                .collect::<StoreResult<_>>()?,
            attendance: raw
                .attendance
                .into_iter()
                .map(LegacyAttendanceRow::normalize)
                .collect::<StoreResult<_>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_snake_case_wins_over_camel_case() {
        let row: LegacyEmployeeRow = serde_json::from_str(
            r#"{"id": "emp_001", "base_salary": "20000", "baseSalary": "18000"}"#,
        )
        .unwrap();
        assert_eq!(row.normalize().unwrap().base_salary, dec("20000"));
    }

    #[test]
    fn test_null_snake_case_falls_back_to_camel_case() {
        let row: LegacyEmployeeRow = serde_json::from_str(
            r#"{"id": "emp_001", "hand_salary": null, "handSalary": 9000, "hasAttendanceBonus": true}"#,
        )
        .unwrap();
        let employee = row.normalize().unwrap();
        assert_eq!(employee.hand_salary, dec("9000"));
        assert!(employee.has_attendance_bonus);
        assert_eq!(employee.bank_salary, Decimal::ZERO);
    }

    #[test]
    fn test_employee_without_id_is_rejected() {
        let row: LegacyEmployeeRow = serde_json::from_str(r#"{"baseSalary": 1}"#).unwrap();
        assert!(row.normalize().is_err());
    }

    #[test]
    fn test_attendance_mixed_spellings() {
        let row: LegacyAttendanceRow = serde_json::from_str(
            r#"{"employeeId": "emp_002", "date": "2026-03-04", "late_minutes": 10, "extraMinutes": 30}"#,
        )
        .unwrap();
        let record = row.normalize().unwrap();
        assert_eq!(record.employee_id, "emp_002");
        assert_eq!(record.late_minutes, 10);
        assert_eq!(record.extra_minutes, 30);
        assert!(!record.is_holiday);
    }

    #[test]
    fn test_attendance_without_date_is_rejected() {
        let row: LegacyAttendanceRow =
            serde_json::from_str(r#"{"employee_id": "emp_002"}"#).unwrap();
        assert!(row.normalize().is_err());
    }

    #[test]
    fn test_invalid_seed_json_is_backend_error() {
        let err = SeedData::from_legacy_json("not json").unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
