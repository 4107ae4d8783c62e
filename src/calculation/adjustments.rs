//! Attendance adjustment calculation.
//!
//! This module turns a period's attendance records into deduction and addition
//! totals plus the ledger lines that explain them. It is a pure function of its
//! inputs; persistence is handled by the orchestrator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rates::{Rates, overtime_multiplier};
use super::totals::round2;
use crate::models::{AdjustmentType, AttendanceRecord, LedgerLine};

/// Ledger concept for an absence that was neither justified nor on a holiday.
pub const CONCEPT_UNEXCUSED_ABSENCE: &str = "Unexcused Absence";
/// Ledger concept for a late arrival.
pub const CONCEPT_LATE_ARRIVAL: &str = "Late Arrival";
/// Ledger concept for leaving before the end of the shift.
pub const CONCEPT_EARLY_DEPARTURE: &str = "Early Departure";
/// Ledger concept for minutes worked beyond the shift.
pub const CONCEPT_OVERTIME: &str = "Overtime";
/// Ledger concept for attending on a holiday.
pub const CONCEPT_HOLIDAY_WORKED: &str = "Holiday Worked";

/// The outcome of processing a period's attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    /// Sum of all deduction lines, rounded to cents.
    pub deductions: Decimal,
    /// Sum of all addition lines, rounded to cents.
    pub additions: Decimal,
    /// One line per fired rule, in input order.
    pub ledger_lines: Vec<LedgerLine>,
}

impl AdjustmentResult {
    /// A result with no adjustments.
    pub fn empty() -> Self {
        Self {
            deductions: Decimal::ZERO,
            additions: Decimal::ZERO,
            ledger_lines: Vec::new(),
        }
    }
}

/// Computes deductions, additions and ledger lines for a set of attendance records.
///
/// Each record is evaluated independently and several rules may fire on the
/// same day:
///
/// 1. Unexcused absence deducts one daily rate.
/// 2. Late arrival deducts `minute_rate * late_minutes`.
/// 3. Early departure deducts `minute_rate * early_departure_minutes`.
/// 4. Overtime adds `minute_rate * extra_minutes * 1.5`.
/// 5. Holiday worked (present on a holiday) adds one daily rate.
///
/// Totals are rounded to two decimal places once, after summing the whole
/// period. Line amounts are kept unrounded. Lines follow the order of
/// `records`; callers wanting date order must sort first.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{compute_adjustments, derive_rates};
/// use payroll_engine::models::AttendanceRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut day = AttendanceRecord::present("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// day.is_absent = true;
///
/// let result = compute_adjustments(&[day], &derive_rates(Decimal::new(18000, 0)));
/// assert_eq!(result.deductions, Decimal::new(600, 0));
/// assert_eq!(result.additions, Decimal::ZERO);
/// assert_eq!(result.ledger_lines[0].concept, "Unexcused Absence");
/// ```
pub fn compute_adjustments(records: &[AttendanceRecord], rates: &Rates) -> AdjustmentResult {
    let mut deductions = Decimal::ZERO;
    let mut additions = Decimal::ZERO;
    let mut ledger_lines = Vec::new();

    for record in records {
        if record.is_unexcused_absence() {
            let amount = rates.daily;
            deductions += amount;
            push_line(
                &mut ledger_lines,
                record,
                CONCEPT_UNEXCUSED_ABSENCE,
                AdjustmentType::Deduction,
                amount,
                format!("Unexcused absence on {}", record.date),
            );
        }

        if record.late_minutes > 0 {
            let amount = rates.minute * Decimal::from(record.late_minutes);
            deductions += amount;
            push_line(
                &mut ledger_lines,
                record,
                CONCEPT_LATE_ARRIVAL,
                AdjustmentType::Deduction,
                amount,
                format!("{} minutes late on {}", record.late_minutes, record.date),
            );
        }

        if record.early_departure_minutes > 0 {
            let amount = rates.minute * Decimal::from(record.early_departure_minutes);
            deductions += amount;
            push_line(
                &mut ledger_lines,
                record,
                CONCEPT_EARLY_DEPARTURE,
                AdjustmentType::Deduction,
                amount,
                format!(
                    "Left {} minutes early on {}",
                    record.early_departure_minutes, record.date
                ),
            );
        }

        if record.extra_minutes > 0 {
            let amount = rates.minute * Decimal::from(record.extra_minutes) * overtime_multiplier();
            additions += amount;
            push_line(
                &mut ledger_lines,
                record,
                CONCEPT_OVERTIME,
                AdjustmentType::Addition,
                amount,
                format!(
                    "{} extra minutes at {}x on {}",
                    record.extra_minutes,
                    overtime_multiplier().normalize(),
                    record.date
                ),
            );
        }

        if record.is_holiday_worked() {
            let amount = rates.daily;
            additions += amount;
            push_line(
                &mut ledger_lines,
                record,
                CONCEPT_HOLIDAY_WORKED,
                AdjustmentType::Addition,
                amount,
                format!("Worked on holiday {}", record.date),
            );
        }
    }

    let result = AdjustmentResult {
        deductions: round2(deductions),
        additions: round2(additions),
        ledger_lines,
    };

    debug!(
        records = records.len(),
        lines = result.ledger_lines.len(),
        deductions = %result.deductions,
        additions = %result.additions,
        "Computed attendance adjustments"
    );

    result
}

fn push_line(
    lines: &mut Vec<LedgerLine>,
    record: &AttendanceRecord,
    concept: &str,
    line_type: AdjustmentType,
    amount: Decimal,
    description: String,
) {
    debug!(
        employee_id = %record.employee_id,
        date = %record.date,
        concept,
        line_type = %line_type,
        amount = %amount,
        "Attendance rule fired"
    );
    lines.push(LedgerLine {
        date: record.date,
        concept: concept.to_string(),
        line_type,
        amount,
        description,
    });
}
