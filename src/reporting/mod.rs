//! Period reports over a set of payroll records.
//!
//! Both helpers work on whatever slice they are given; callers decide which
//! records (period, paid or not) go into a report.

mod export;
mod summary;

pub use export::{CSV_HEADER, export_csv};
pub use summary::{LocationTotals, PayrollSummary, summarize};
