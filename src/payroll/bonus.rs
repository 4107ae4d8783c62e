//! Flat attendance bonus.
//!
//! Setting or clearing the bonus only recomputes the two payable totals from
//! the record's current deductions and additions. Attendance is not
//! re-evaluated, so a record whose adjustments were never computed keeps its
//! stale figures.

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::orchestrator::ensure_non_negative;
use super::{BatchOutcome, PayrollKey, PayrollService};
use crate::calculation::{final_hand_salary, total_salary};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayPeriod, PayrollRecord, PayrollUpdate};

impl PayrollService {
    /// Grants the attendance bonus to each listed employee's record for the period.
    pub async fn apply_bonus(
        &self,
        employee_ids: &[String],
        period: PayPeriod,
        amount: Decimal,
    ) -> PayrollResult<BatchOutcome> {
        ensure_non_negative("attendance_bonus", amount)?;
        Ok(self.set_bonus(employee_ids, period, true, amount).await)
    }

    /// Clears the attendance bonus on each listed employee's record for the period.
    pub async fn remove_bonus(&self, employee_ids: &[String], period: PayPeriod) -> BatchOutcome {
        self.set_bonus(employee_ids, period, false, Decimal::ZERO)
            .await
    }

    async fn set_bonus(
        &self,
        employee_ids: &[String],
        period: PayPeriod,
        enabled: bool,
        amount: Decimal,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for employee_id in employee_ids {
            match self.set_bonus_for(employee_id, period, enabled, amount).await {
                Ok(record) => outcome.succeeded.push(record),
                Err(e) => {
                    warn!(employee_id = %employee_id, period = %period, error = %e, "Skipping employee in bonus batch");
                    outcome.fail(employee_id.clone(), e);
                }
            }
        }
        info!(
            period = %period,
            enabled,
            amount = %amount,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Updated attendance bonus"
        );
        outcome
    }

    async fn set_bonus_for(
        &self,
        employee_id: &str,
        period: PayPeriod,
        enabled: bool,
        amount: Decimal,
    ) -> PayrollResult<PayrollRecord> {
        let _guard = self.locks.lock(PayrollKey::new(employee_id, period)).await;
        let record = self
            .store
            .find_payroll_record(employee_id, period.month, period.year)
            .await?
            .ok_or_else(|| PayrollError::PayrollRecordNotFound {
                id: format!("{}/{}", employee_id, period),
            })?;

        let update = PayrollUpdate {
            has_attendance_bonus: Some(enabled),
            attendance_bonus: Some(amount),
            final_hand_salary: Some(final_hand_salary(
                record.hand_salary,
                record.deductions,
                record.additions,
            )),
            total_salary: Some(total_salary(record.base_salary, record.bank_salary, amount)),
            ..Default::default()
        };

        Ok(self
            .store
            .update_payroll_record(record.id, record.revision, update)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::fixtures::{absent, dec, march, service_with, standard_employee};

    #[tokio::test]
    async fn test_apply_bonus_keeps_adjustments() {
        let (service, _) =
            service_with(vec![standard_employee("emp_001")], vec![absent("emp_001", 3)]);
        service.generate_period(march()).await.unwrap();

        let outcome = service
            .apply_bonus(&["emp_001".to_string()], march(), dec("500"))
            .await
            .unwrap();

        assert!(outcome.is_complete());
        let record = &outcome.succeeded[0];
        assert!(record.has_attendance_bonus);
        assert_eq!(record.attendance_bonus, dec("500"));
        assert_eq!(record.deductions, dec("600.00"));
        assert_eq!(record.final_hand_salary, dec("8400.00"));
        assert_eq!(record.total_salary, dec("27500"));
    }

    #[tokio::test]
    async fn test_remove_bonus_restores_total() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        service.generate_period(march()).await.unwrap();
        let ids = vec!["emp_001".to_string()];
        service.apply_bonus(&ids, march(), dec("500")).await.unwrap();

        let outcome = service.remove_bonus(&ids, march()).await;

        let record = &outcome.succeeded[0];
        assert!(!record.has_attendance_bonus);
        assert_eq!(record.attendance_bonus, Decimal::ZERO);
        assert_eq!(record.total_salary, dec("27000"));
    }

    #[tokio::test]
    async fn test_bonus_for_missing_record_fails_that_employee() {
        let (service, _) = service_with(
            vec![standard_employee("emp_001"), standard_employee("emp_002")],
            vec![],
        );
        service.ensure_record("emp_001", march()).await.unwrap();
        let ids = vec!["emp_001".to_string(), "emp_002".to_string()];

        let outcome = service.apply_bonus(&ids, march(), dec("250")).await.unwrap();

        assert_eq!(outcome.succeeded.len(), 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].employee_id, "emp_002");
    }

    #[tokio::test]
    async fn test_negative_bonus_rejected() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);

        let result = service
            .apply_bonus(&["emp_001".to_string()], march(), dec("-10"))
            .await;

        assert!(matches!(result, Err(PayrollError::InvalidAmount { .. })));
    }
}
