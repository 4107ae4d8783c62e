//! Payroll Adjustment Engine
//!
//! This crate turns daily attendance into monthly payroll records: it derives
//! daily, hourly and per-minute rates from a base salary, converts absences,
//! lateness, early departures, overtime and worked holidays into deductions and
//! additions, and keeps each record's totals, ledger and payment status
//! consistent under concurrent recomputation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod reporting;
pub mod store;
