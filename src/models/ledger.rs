//! Ledger lines recorded against a payroll record.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a ledger line lowers or raises the payable amount.
///
/// The sign of an adjustment is carried here, never by a negative amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// Subtracted from the hand salary.
    Deduction,
    /// Added to the hand salary.
    Addition,
}

impl fmt::Display for AdjustmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentType::Deduction => f.write_str("deduction"),
            AdjustmentType::Addition => f.write_str("addition"),
        }
    }
}

/// One labeled deduction or addition kept for audit and display.
///
/// Amounts are stored unrounded; only the period totals are rounded.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AdjustmentType, LedgerLine};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let line = LedgerLine {
///     date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     concept: "Late Arrival".to_string(),
///     line_type: AdjustmentType::Deduction,
///     amount: Decimal::new(3125, 1),
///     description: "15 minutes late".to_string(),
/// };
/// assert!(line.is_deduction());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// The attendance day that produced the line.
    pub date: NaiveDate,
    /// Short label, e.g. "Unexcused Absence".
    pub concept: String,
    /// Which bucket the amount belongs to.
    #[serde(rename = "type")]
    pub line_type: AdjustmentType,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Human-readable explanation.
    pub description: String,
}

impl LedgerLine {
    /// Returns true if the line is a deduction.
    pub fn is_deduction(&self) -> bool {
        self.line_type == AdjustmentType::Deduction
    }
}
