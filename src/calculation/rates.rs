//! Rate derivation from a monthly base salary.
//!
//! Every month is treated as a flat 30-day unit of 8-hour days, regardless of
//! the real calendar length or the employee's shift length.

use rust_decimal::Decimal;
use tracing::debug;

/// Days in the flat payroll month.
pub const DAYS_PER_MONTH: u32 = 30;

/// Hours in a payroll day.
pub const HOURS_PER_DAY: u32 = 8;

/// Minutes in an hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Returns the overtime multiplier (150%).
pub fn overtime_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

/// Per-day, per-hour and per-minute rates derived from a base salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rates {
    /// `base_salary / 30`.
    pub daily: Decimal,
    /// `daily / 8`.
    pub hourly: Decimal,
    /// `hourly / 60`.
    pub minute: Decimal,
}

/// Derives the attendance rates for a monthly base salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::derive_rates;
/// use rust_decimal::Decimal;
///
/// let rates = derive_rates(Decimal::new(18000, 0));
/// assert_eq!(rates.daily, Decimal::new(600, 0));
/// assert_eq!(rates.hourly, Decimal::new(75, 0));
/// assert_eq!(rates.minute, Decimal::new(125, 2));
/// ```
pub fn derive_rates(base_salary: Decimal) -> Rates {
    let daily = base_salary / Decimal::from(DAYS_PER_MONTH);
    let hourly = daily / Decimal::from(HOURS_PER_DAY);
    let minute = hourly / Decimal::from(MINUTES_PER_HOUR);

    debug!(
        base_salary = %base_salary,
        daily = %daily,
        hourly = %hourly,
        minute = %minute,
        "Derived attendance rates"
    );

    Rates {
        daily,
        hourly,
        minute,
    }
}
