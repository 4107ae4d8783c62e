//! Monthly pay period.
//!
//! A [`PayPeriod`] identifies a calendar month. Its date range is only used to
//! select attendance records; salary rates never depend on the month length.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// A calendar month for which payroll is computed.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2, 2028).unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
/// assert!(PayPeriod::new(13, 2028).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The year.
    pub year: i32,
    /// The month, 1 through 12.
    pub month: u32,
}

impl PayPeriod {
    /// Creates a period, rejecting months outside 1..=12.
    pub fn new(month: u32, year: i32) -> PayrollResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PayrollError::InvalidPeriod { month, year });
        }
        Ok(Self { year, month })
    }

    /// The first day of the month.
    pub fn start_date(&self) -> NaiveDate {
        // month was validated in new(); serde input is re-validated by callers
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn end_date(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month >= 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks if a date falls within the month (inclusive on both ends).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
