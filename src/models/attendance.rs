//! Daily attendance records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of attendance for an employee.
///
/// Minute counters are unsigned, so the non-negative constraint holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// The employee did not show up.
    #[serde(default)]
    pub is_absent: bool,
    /// The absence was excused.
    #[serde(default)]
    pub is_justified: bool,
    /// The day is a holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Minutes late on arrival.
    #[serde(default)]
    pub late_minutes: u32,
    /// Minutes left before the end of the shift.
    #[serde(default)]
    pub early_departure_minutes: u32,
    /// Minutes worked beyond the shift.
    #[serde(default)]
    pub extra_minutes: u32,
}

impl AttendanceRecord {
    /// Creates a record for a normal day with no flags set.
    pub fn present(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            is_absent: false,
            is_justified: false,
            is_holiday: false,
            late_minutes: 0,
            early_departure_minutes: 0,
            extra_minutes: 0,
        }
    }

    /// An absence that was neither excused nor on a holiday.
    ///
    /// ```
    /// use payroll_engine::models::AttendanceRecord;
    /// use chrono::NaiveDate;
    ///
    /// let mut record = AttendanceRecord::present("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    /// record.is_absent = true;
    /// assert!(record.is_unexcused_absence());
    ///
    /// record.is_holiday = true;
    /// assert!(!record.is_unexcused_absence());
    /// ```
    pub fn is_unexcused_absence(&self) -> bool {
        self.is_absent && !self.is_justified && !self.is_holiday
    }

    /// The employee was present on a holiday.
    pub fn is_holiday_worked(&self) -> bool {
        self.is_holiday && !self.is_absent
    }
}
