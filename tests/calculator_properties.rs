//! Property tests for rate derivation and attendance adjustments.

use chrono::NaiveDate;
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    AdjustmentResult, compute_adjustments, derive_rates, overtime_multiplier, round2,
};
use payroll_engine::models::AttendanceRecord;

fn base_salary() -> impl Strategy<Value = Decimal> {
    // 1,000.00 to 1,000,000.00 in cents
    (100_000_i64..100_000_000_i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn compute(base: Decimal, records: &[AttendanceRecord]) -> AdjustmentResult {
    compute_adjustments(records, &derive_rates(base))
}

fn arbitrary_day() -> impl Strategy<Value = AttendanceRecord> {
    (
        1_u32..=31,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0_u32..240,
        0_u32..240,
        0_u32..480,
    )
        .prop_map(
            |(day, is_absent, is_justified, is_holiday, late, early, extra)| AttendanceRecord {
                employee_id: "emp_prop".to_string(),
                date: march(day),
                is_absent,
                is_justified,
                is_holiday,
                late_minutes: late,
                early_departure_minutes: early,
                extra_minutes: extra,
            },
        )
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn plain_days_produce_nothing(base in base_salary(), days in 1_u32..=31) {
        let records: Vec<_> = (1..=days)
            .map(|d| AttendanceRecord::present("emp_prop", march(d)))
            .collect();

        let result = compute(base, &records);

        prop_assert_eq!(result.deductions, Decimal::ZERO);
        prop_assert_eq!(result.additions, Decimal::ZERO);
        prop_assert!(result.ledger_lines.is_empty());
    }

    #[test]
    fn unexcused_absence_costs_one_day(base in base_salary()) {
        let mut record = AttendanceRecord::present("emp_prop", march(3));
        record.is_absent = true;

        let result = compute(base, &[record]);

        prop_assert_eq!(result.deductions, round2(base / Decimal::from(30)));
        prop_assert_eq!(result.ledger_lines.len(), 1);
    }

    #[test]
    fn excused_absence_costs_nothing(base in base_salary(), justified in any::<bool>()) {
        let mut record = AttendanceRecord::present("emp_prop", march(3));
        record.is_absent = true;
        record.is_justified = justified;
        record.is_holiday = !justified;

        let result = compute(base, &[record]);

        prop_assert_eq!(result.deductions, Decimal::ZERO);
        prop_assert_eq!(result.additions, Decimal::ZERO);
    }

    #[test]
    fn late_minutes_cost_minute_rate(base in base_salary(), minutes in 1_u32..480) {
        let mut record = AttendanceRecord::present("emp_prop", march(4));
        record.late_minutes = minutes;

        let result = compute(base, &[record]);

        let minute = derive_rates(base).minute;
        prop_assert_eq!(result.deductions, round2(minute * Decimal::from(minutes)));
        prop_assert_eq!(result.additions, Decimal::ZERO);
    }

    #[test]
    fn overtime_pays_time_and_a_half(base in base_salary(), minutes in 1_u32..480) {
        let mut record = AttendanceRecord::present("emp_prop", march(5));
        record.extra_minutes = minutes;

        let result = compute(base, &[record]);

        let minute = derive_rates(base).minute;
        prop_assert_eq!(
            result.additions,
            round2(minute * Decimal::from(minutes) * overtime_multiplier())
        );
    }

    #[test]
    fn worked_holiday_adds_one_day(base in base_salary()) {
        let mut record = AttendanceRecord::present("emp_prop", march(2));
        record.is_holiday = true;

        let result = compute(base, &[record]);

        prop_assert_eq!(result.additions, round2(derive_rates(base).daily));
        prop_assert_eq!(result.deductions, Decimal::ZERO);
    }

    #[test]
    fn recomputation_is_stable(
        base in base_salary(),
        records in prop::collection::vec(arbitrary_day(), 0..31)
    ) {
        let first = compute(base, &records);
        let second = compute(base, &records);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn totals_are_non_negative_cents(
        base in base_salary(),
        records in prop::collection::vec(arbitrary_day(), 0..31)
    ) {
        let result = compute(base, &records);

        prop_assert!(!result.deductions.is_sign_negative());
        prop_assert!(!result.additions.is_sign_negative());
        prop_assert!(result.deductions.scale() <= 2);
        prop_assert!(result.additions.scale() <= 2);

        let line_sum: Decimal = result
            .ledger_lines
            .iter()
            .filter(|l| l.is_deduction())
            .map(|l| l.amount)
            .sum();
        prop_assert_eq!(round2(line_sum), result.deductions);
    }
}
