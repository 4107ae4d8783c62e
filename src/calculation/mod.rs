//! Calculation logic for the payroll engine.
//!
//! This module contains the pure computations: rate derivation from a base
//! salary, attendance adjustments with their ledger lines, and the two payable
//! totals stored on every payroll record.

mod adjustments;
mod rates;
mod totals;

pub use adjustments::{
    AdjustmentResult, CONCEPT_EARLY_DEPARTURE, CONCEPT_HOLIDAY_WORKED, CONCEPT_LATE_ARRIVAL,
    CONCEPT_OVERTIME, CONCEPT_UNEXCUSED_ABSENCE, compute_adjustments,
};
pub use rates::{
    DAYS_PER_MONTH, HOURS_PER_DAY, MINUTES_PER_HOUR, Rates, derive_rates, overtime_multiplier,
};
pub use totals::{MONEY_DECIMAL_PLACES, final_hand_salary, round2, total_salary};
