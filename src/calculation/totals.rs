//! Payable totals shared by every operation that mutates a payroll record.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on stored monetary totals.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds to cents, half away from zero.
///
/// ```
/// use payroll_engine::calculation::round2;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round2(Decimal::new(84375, 3)), Decimal::new(8438, 2));
/// ```
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Cash-in-hand payable after attendance adjustments.
pub fn final_hand_salary(hand_salary: Decimal, deductions: Decimal, additions: Decimal) -> Decimal {
    round2(hand_salary - deductions + additions)
}

/// Total payroll cost; never netted against attendance adjustments.
pub fn total_salary(base_salary: Decimal, bank_salary: Decimal, attendance_bonus: Decimal) -> Decimal {
    base_salary + bank_salary + attendance_bonus
}
