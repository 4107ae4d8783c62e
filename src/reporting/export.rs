//! CSV export of a period's payroll records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{PayrollError, PayrollResult};
use crate::models::PayrollRecord;

/// Column names of the exported file, in order.
pub const CSV_HEADER: [&str; 16] = [
    "employee_id",
    "employee_name",
    "location",
    "month",
    "year",
    "base_salary",
    "bank_salary",
    "hand_salary",
    "deductions",
    "additions",
    "attendance_bonus",
    "final_hand_salary",
    "total_salary",
    "status",
    "paid_hand_at",
    "paid_bank_at",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    employee_id: &'a str,
    employee_name: &'a str,
    location: &'a str,
    month: u32,
    year: i32,
    base_salary: Decimal,
    bank_salary: Decimal,
    hand_salary: Decimal,
    deductions: Decimal,
    additions: Decimal,
    attendance_bonus: Decimal,
    final_hand_salary: Decimal,
    total_salary: Decimal,
    status: &'static str,
    paid_hand_at: Option<DateTime<Utc>>,
    paid_bank_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a PayrollRecord> for CsvRow<'a> {
    fn from(record: &'a PayrollRecord) -> Self {
        Self {
            employee_id: &record.employee_id,
            employee_name: &record.employee_name,
            location: &record.location,
            month: record.month,
            year: record.year,
            base_salary: record.base_salary,
            bank_salary: record.bank_salary,
            hand_salary: record.hand_salary,
            deductions: record.deductions,
            additions: record.additions,
            attendance_bonus: record.attendance_bonus,
            final_hand_salary: record.final_hand_salary,
            total_salary: record.total_salary,
            status: record.status().label(),
            paid_hand_at: record.paid_hand_at,
            paid_bank_at: record.paid_bank_at,
        }
    }
}

fn export_error(error: impl ToString) -> PayrollError {
    PayrollError::ExportFailed {
        message: error.to_string(),
    }
}

/// Renders records as CSV with a header row.
///
/// The header is written even when `records` is empty. Unpaid timestamps are
/// left blank.
pub fn export_csv(records: &[PayrollRecord]) -> PayrollResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_error)?;
    for record in records {
        writer.serialize(CsvRow::from(record)).map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(export_error)?;
    String::from_utf8(bytes).map_err(export_error)
}
