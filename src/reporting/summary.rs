//! Per-location payroll totals for a period.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::PayrollRecord;

/// Totals for one location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationTotals {
    /// Records at this location.
    pub record_count: usize,
    /// Sum of `final_hand_salary`.
    pub total_hand_salary: Decimal,
    /// Sum of `bank_salary`.
    pub total_bank_salary: Decimal,
    /// Sum of `total_salary`.
    pub total_salary: Decimal,
}

/// Aggregate figures for a set of payroll records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollSummary {
    /// Number of records summarized.
    pub record_count: usize,
    /// Sum of `final_hand_salary`, the cash actually owed.
    pub total_hand_salary: Decimal,
    /// Sum of `bank_salary`.
    pub total_bank_salary: Decimal,
    /// Sum of `total_salary`.
    pub total_salary: Decimal,
    /// Sum of `deductions`.
    pub total_deductions: Decimal,
    /// Sum of `additions`.
    pub total_additions: Decimal,
    /// Sum of `attendance_bonus` over records where the bonus applies.
    pub total_bonuses: Decimal,
    /// Records with the cash portion paid.
    pub hand_paid_count: usize,
    /// Records with the bank portion paid.
    pub bank_paid_count: usize,
    /// Records with both portions paid.
    pub fully_paid_count: usize,
    /// Per-location breakdown, ordered by location name.
    pub by_location: BTreeMap<String, LocationTotals>,
}

/// Aggregates a set of records.
pub fn summarize(records: &[PayrollRecord]) -> PayrollSummary {
    let mut summary = PayrollSummary::default();

    for record in records {
        summary.record_count += 1;
        summary.total_hand_salary += record.final_hand_salary;
        summary.total_bank_salary += record.bank_salary;
        summary.total_salary += record.total_salary;
        summary.total_deductions += record.deductions;
        summary.total_additions += record.additions;
        if record.has_attendance_bonus {
            summary.total_bonuses += record.attendance_bonus;
        }
        if record.is_paid_hand {
            summary.hand_paid_count += 1;
        }
        if record.is_paid_bank {
            summary.bank_paid_count += 1;
        }
        if record.is_fully_paid() {
            summary.fully_paid_count += 1;
        }

        let location = summary
            .by_location
            .entry(record.location.clone())
            .or_default();
        location.record_count += 1;
        location.total_hand_salary += record.final_hand_salary;
        location.total_bank_salary += record.bank_salary;
        location.total_salary += record.total_salary;
    }

    summary
}
