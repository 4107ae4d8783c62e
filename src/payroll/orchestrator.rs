//! Record creation, recalculation and regeneration.
//!
//! Every mutation takes the [`PayrollKey`] lock of the record it touches and
//! writes through the store's revision check, so concurrent recomputations of
//! the same employee and period are applied one after the other.

use rust_decimal::Decimal;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{BatchOutcome, PayrollKey, PayrollService};
use crate::calculation::{compute_adjustments, derive_rates, final_hand_salary, total_salary};
use crate::error::{PayrollError, PayrollResult, StoreError};
use crate::models::{
    AttendanceRecord, Employee, LedgerLine, NewPayrollRecord, PayPeriod, PayrollRecord,
    PayrollUpdate,
};

/// Builds the initial record for an employee: no adjustments yet.
fn seed_record(employee: &Employee, period: PayPeriod) -> NewPayrollRecord {
    let bonus = employee.effective_attendance_bonus();
    NewPayrollRecord {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        location: employee.location.clone(),
        month: period.month,
        year: period.year,
        base_salary: employee.base_salary,
        bank_salary: employee.bank_salary,
        hand_salary: employee.hand_salary,
        deductions: Decimal::ZERO,
        additions: Decimal::ZERO,
        final_hand_salary: final_hand_salary(employee.hand_salary, Decimal::ZERO, Decimal::ZERO),
        total_salary: total_salary(employee.base_salary, employee.bank_salary, bonus),
        has_attendance_bonus: employee.has_attendance_bonus,
        attendance_bonus: bonus,
    }
}

pub(super) fn key_of(record: &PayrollRecord) -> PayrollKey {
    PayrollKey::new(record.employee_id.clone(), record.period())
}

pub(super) fn ensure_non_negative(field: &str, value: Decimal) -> PayrollResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PayrollError::InvalidAmount {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

impl PayrollService {
    /// Returns the record for an employee and period, creating it if needed.
    ///
    /// Calling this twice returns the same record; the second call does not
    /// touch the store beyond the lookup.
    pub async fn ensure_record(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> PayrollResult<PayrollRecord> {
        let _guard = self.locks.lock(PayrollKey::new(employee_id, period)).await;
        self.ensure_record_locked(employee_id, period)
            .await
            .inspect_err(|e| {
                error!(employee_id, period = %period, error = %e, "Failed to ensure payroll record")
            })
    }

    async fn ensure_record_locked(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> PayrollResult<PayrollRecord> {
        if let Some(existing) = self
            .store
            .find_payroll_record(employee_id, period.month, period.year)
            .await?
        {
            debug!(record_id = %existing.id, employee_id, period = %period, "Payroll record already exists");
            return Ok(existing);
        }

        let employee = self.store.get_employee(employee_id).await?;
        match self
            .store
            .create_payroll_record(seed_record(&employee, period))
            .await
        {
            Ok(record) => {
                info!(record_id = %record.id, employee_id, period = %period, "Created payroll record");
                Ok(record)
            }
            Err(StoreError::Duplicate { .. }) => {
                // another process created it between the lookup and the insert
                self.store
                    .find_payroll_record(employee_id, period.month, period.year)
                    .await?
                    .ok_or_else(|| PayrollError::PayrollRecordNotFound {
                        id: format!("{}/{}", employee_id, period),
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Locks a record's key and re-reads it so the revision is current.
    pub(super) async fn lock_record(
        &self,
        record_id: Uuid,
    ) -> PayrollResult<(OwnedMutexGuard<()>, PayrollRecord)> {
        let record = self.store.get_payroll_record(record_id).await?;
        let guard = self.locks.lock(key_of(&record)).await;
        let record = self.store.get_payroll_record(record_id).await?;
        Ok((guard, record))
    }

    /// Recomputes adjustments for a record from the given attendance.
    ///
    /// Records belonging to another employee or falling outside the record's
    /// period are ignored. Totals and ledger lines are committed together.
    pub async fn apply_adjustments(
        &self,
        record_id: Uuid,
        attendance: &[AttendanceRecord],
    ) -> PayrollResult<PayrollRecord> {
        let result = async {
            let (_guard, record) = self.lock_record(record_id).await?;
            self.apply_locked(&record, attendance).await
        }
        .await;
        result.inspect_err(|e| {
            error!(record_id = %record_id, error = %e, "Failed to apply payroll adjustments")
        })
    }

    async fn apply_locked(
        &self,
        record: &PayrollRecord,
        attendance: &[AttendanceRecord],
    ) -> PayrollResult<PayrollRecord> {
        let period = record.period();
        let in_scope: Vec<AttendanceRecord> = attendance
            .iter()
            .filter(|a| a.employee_id == record.employee_id && period.contains_date(a.date))
            .cloned()
            .collect();
        if in_scope.len() != attendance.len() {
            warn!(
                record_id = %record.id,
                ignored = attendance.len() - in_scope.len(),
                "Ignored attendance outside the record's employee or period"
            );
        }

        let rates = derive_rates(record.base_salary);
        let result = compute_adjustments(&in_scope, &rates);

        let update = PayrollUpdate {
            deductions: Some(result.deductions),
            additions: Some(result.additions),
            final_hand_salary: Some(final_hand_salary(
                record.hand_salary,
                result.deductions,
                result.additions,
            )),
            total_salary: Some(total_salary(
                record.base_salary,
                record.bank_salary,
                record.attendance_bonus,
            )),
            ..Default::default()
        };

        let line_count = result.ledger_lines.len();
        let updated = self
            .store
            .commit_adjustments(record.id, record.revision, update, result.ledger_lines)
            .await?;

        info!(
            record_id = %updated.id,
            employee_id = %updated.employee_id,
            period = %period,
            deductions = %updated.deductions,
            additions = %updated.additions,
            final_hand_salary = %updated.final_hand_salary,
            lines = line_count,
            "Applied payroll adjustments"
        );
        Ok(updated)
    }

    /// Reloads attendance for the record's period and recomputes it.
    pub async fn recalculate_record(&self, record_id: Uuid) -> PayrollResult<PayrollRecord> {
        let result = async {
            let (_guard, record) = self.lock_record(record_id).await?;
            let attendance = self.attendance_for(&record.employee_id, record.period()).await?;
            self.apply_locked(&record, &attendance).await
        }
        .await;
        result.inspect_err(|e| {
            error!(record_id = %record_id, error = %e, "Failed to recalculate payroll record")
        })
    }

    async fn attendance_for(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> PayrollResult<Vec<AttendanceRecord>> {
        Ok(self
            .store
            .get_attendance(employee_id, period.start_date(), period.end_date())
            .await?)
    }

    /// Rebuilds a record from the employee's current figures and attendance.
    ///
    /// Salary figures and the bonus are re-read from the employee and the
    /// adjustments are recomputed from scratch. Any manual override on the
    /// record is lost. The reset and the new ledger are committed together,
    /// so a failure before the commit leaves the record as it was.
    pub async fn force_regenerate(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> PayrollResult<PayrollRecord> {
        let _guard = self.locks.lock(PayrollKey::new(employee_id, period)).await;
        let result = async {
            let employee = self.store.get_employee(employee_id).await?;
            let attendance = self.attendance_for(employee_id, period).await?;
            let record = self.ensure_record_locked(employee_id, period).await?;

            let bonus = employee.effective_attendance_bonus();
            let result = compute_adjustments(&attendance, &derive_rates(employee.base_salary));
            let update = PayrollUpdate {
                base_salary: Some(employee.base_salary),
                bank_salary: Some(employee.bank_salary),
                hand_salary: Some(employee.hand_salary),
                deductions: Some(result.deductions),
                additions: Some(result.additions),
                final_hand_salary: Some(final_hand_salary(
                    employee.hand_salary,
                    result.deductions,
                    result.additions,
                )),
                total_salary: Some(total_salary(
                    employee.base_salary,
                    employee.bank_salary,
                    bonus,
                )),
                has_attendance_bonus: Some(employee.has_attendance_bonus),
                attendance_bonus: Some(bonus),
                ..Default::default()
            };

            let line_count = result.ledger_lines.len();
            let updated = self
                .store
                .commit_adjustments(record.id, record.revision, update, result.ledger_lines)
                .await?;
            info!(
                record_id = %updated.id,
                employee_id,
                period = %period,
                deductions = %updated.deductions,
                additions = %updated.additions,
                final_hand_salary = %updated.final_hand_salary,
                lines = line_count,
                "Regenerated payroll record"
            );
            Ok::<_, PayrollError>(updated)
        }
        .await;
        result.inspect_err(|e| {
            error!(employee_id, period = %period, error = %e, "Failed to regenerate payroll record")
        })
    }

    /// Forces regeneration for each listed employee.
    pub async fn force_regenerate_payrolls(
        &self,
        period: PayPeriod,
        employee_ids: &[String],
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for employee_id in employee_ids {
            match self.force_regenerate(employee_id, period).await {
                Ok(record) => outcome.succeeded.push(record),
                Err(e) => {
                    warn!(employee_id = %employee_id, period = %period, error = %e, "Skipping employee in regeneration batch");
                    outcome.fail(employee_id.clone(), e);
                }
            }
        }
        info!(
            period = %period,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Finished regeneration batch"
        );
        outcome
    }

    /// Creates and computes records for every active employee.
    pub async fn generate_period(&self, period: PayPeriod) -> PayrollResult<BatchOutcome> {
        let employees = self
            .store
            .list_employees()
            .await
            .inspect_err(|e| error!(period = %period, error = %e, "Failed to list employees"))?;

        let mut outcome = BatchOutcome::default();
        for employee in employees.iter().filter(|e| e.is_active) {
            let result = async {
                let record = self.ensure_record(&employee.id, period).await?;
                self.recalculate_record(record.id).await
            }
            .await;
            match result {
                Ok(record) => outcome.succeeded.push(record),
                Err(e) => {
                    warn!(employee_id = %employee.id, period = %period, error = %e, "Skipping employee in generation batch");
                    outcome.fail(employee.id.clone(), e);
                }
            }
        }
        info!(
            period = %period,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Finished generation batch"
        );
        Ok(outcome)
    }

    /// Recomputes every existing record of a period from current attendance.
    ///
    /// Fully paid records are included unless the service was configured
    /// with `include_paid: false`.
    pub async fn recalculate_all(&self, period: PayPeriod) -> PayrollResult<BatchOutcome> {
        let records = self
            .store
            .get_payroll_records(period.month, period.year, self.settings.include_paid)
            .await
            .map_err(PayrollError::from)
            .inspect_err(|e| error!(period = %period, error = %e, "Failed to list payroll records"))?;

        let mut outcome = BatchOutcome::default();
        for record in records {
            match self.recalculate_record(record.id).await {
                Ok(updated) => outcome.succeeded.push(updated),
                Err(e) => {
                    warn!(employee_id = %record.employee_id, record_id = %record.id, error = %e, "Skipping record in recalculation batch");
                    outcome.fail(record.employee_id, e);
                }
            }
        }
        info!(
            period = %period,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Finished recalculation batch"
        );
        Ok(outcome)
    }

    /// Manually sets the adjustment totals, leaving the ledger as it was.
    ///
    /// The next recalculation or regeneration replaces these values.
    pub async fn override_adjustments(
        &self,
        record_id: Uuid,
        deductions: Decimal,
        additions: Decimal,
    ) -> PayrollResult<PayrollRecord> {
        let result = async {
            ensure_non_negative("deductions", deductions)?;
            ensure_non_negative("additions", additions)?;
            let (_guard, record) = self.lock_record(record_id).await?;
            let update = PayrollUpdate {
                deductions: Some(deductions),
                additions: Some(additions),
                final_hand_salary: Some(final_hand_salary(record.hand_salary, deductions, additions)),
                ..Default::default()
            };
            let updated = self
                .store
                .update_payroll_record(record.id, record.revision, update)
                .await?;
            info!(record_id = %updated.id, deductions = %deductions, additions = %additions, "Overrode payroll adjustments");
            Ok::<_, PayrollError>(updated)
        }
        .await;
        result.inspect_err(|e| {
            error!(record_id = %record_id, error = %e, "Failed to override payroll adjustments")
        })
    }

    /// Deletes a record and its ledger lines.
    pub async fn delete_record(&self, record_id: Uuid) -> PayrollResult<()> {
        let result = async {
            let (_guard, record) = self.lock_record(record_id).await?;
            self.store.delete_payroll_record(record.id).await?;
            info!(record_id = %record.id, employee_id = %record.employee_id, "Deleted payroll record");
            Ok::<_, PayrollError>(())
        }
        .await;
        result.inspect_err(|e| {
            error!(record_id = %record_id, error = %e, "Failed to delete payroll record")
        })
    }

    /// Fetches a record by id.
    pub async fn get_record(&self, record_id: Uuid) -> PayrollResult<PayrollRecord> {
        Ok(self.store.get_payroll_record(record_id).await?)
    }

    /// Records of a period, optionally including fully paid ones.
    pub async fn records_for_period(
        &self,
        period: PayPeriod,
        include_paid: bool,
    ) -> PayrollResult<Vec<PayrollRecord>> {
        Ok(self
            .store
            .get_payroll_records(period.month, period.year, include_paid)
            .await?)
    }

    /// Every record of an employee, newest first.
    pub async fn records_for_employee(&self, employee_id: &str) -> PayrollResult<Vec<PayrollRecord>> {
        Ok(self.store.get_payroll_records_by_employee(employee_id).await?)
    }

    /// The ledger lines of a record.
    pub async fn ledger_lines(&self, record_id: Uuid) -> PayrollResult<Vec<LedgerLine>> {
        Ok(self.store.ledger_lines(record_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::round2;
    use crate::models::AdjustmentType;
    use crate::payroll::fixtures::{
        absent, dec, employee, holiday_worked, march, service_with, standard_employee,
    };

    #[tokio::test]
    async fn test_ensure_record_is_idempotent() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);

        let first = service.ensure_record("emp_001", march()).await.unwrap();
        let second = service.ensure_record("emp_001", march()).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.revision, 0);
        assert_eq!(first.final_hand_salary, dec("9000"));
        assert_eq!(first.total_salary, dec("27000"));
    }

    #[tokio::test]
    async fn test_ensure_record_unknown_employee() {
        let (service, _) = service_with(vec![], vec![]);

        let result = service.ensure_record("ghost", march()).await;

        assert!(matches!(result, Err(PayrollError::EmployeeNotFound { .. })));
    }

    #[tokio::test]
    async fn test_unexcused_absence_deducts_one_day() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        let updated = service
            .apply_adjustments(record.id, &[absent("emp_001", 3)])
            .await
            .unwrap();

        assert_eq!(updated.deductions, dec("600.00"));
        assert_eq!(updated.additions, Decimal::ZERO);
        assert_eq!(updated.final_hand_salary, dec("8400.00"));
        assert_eq!(updated.total_salary, dec("27000"));

        let lines = service.ledger_lines(record.id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_type, AdjustmentType::Deduction);
    }

    #[tokio::test]
    async fn test_holiday_worked_adds_one_day() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        let updated = service
            .apply_adjustments(record.id, &[holiday_worked("emp_001", 2)])
            .await
            .unwrap();

        assert_eq!(updated.additions, dec("600.00"));
        assert_eq!(updated.final_hand_salary, dec("9600.00"));
        // total ignores adjustments
        assert_eq!(updated.total_salary, dec("27000"));
    }

    #[tokio::test]
    async fn test_recompute_with_same_attendance_is_stable() {
        let attendance = vec![absent("emp_001", 3), holiday_worked("emp_001", 4)];
        let (service, _) = service_with(vec![standard_employee("emp_001")], attendance);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        let first = service.recalculate_record(record.id).await.unwrap();
        let first_lines = service.ledger_lines(record.id).await.unwrap();
        let second = service.recalculate_record(record.id).await.unwrap();
        let second_lines = service.ledger_lines(record.id).await.unwrap();

        assert_eq!(first.deductions, second.deductions);
        assert_eq!(first.additions, second.additions);
        assert_eq!(first.final_hand_salary, second.final_hand_salary);
        assert_eq!(first_lines, second_lines);
        assert_eq!(second_lines.len(), 2);
        assert!(second.revision > first.revision);
    }

    #[tokio::test]
    async fn test_attendance_outside_record_is_ignored() {
        let (service, _) = service_with(
            vec![standard_employee("emp_001"), standard_employee("emp_002")],
            vec![],
        );
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        let mut april = absent("emp_001", 3);
        april.date = chrono::NaiveDate::from_ymd_opt(2026, 4, 3).unwrap();

        let updated = service
            .apply_adjustments(record.id, &[absent("emp_002", 3), april])
            .await
            .unwrap();

        assert_eq!(updated.deductions, Decimal::ZERO);
        assert!(service.ledger_lines(record.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_attendance_clears_previous_lines() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        service
            .apply_adjustments(record.id, &[absent("emp_001", 3)])
            .await
            .unwrap();

        let updated = service.apply_adjustments(record.id, &[]).await.unwrap();

        assert_eq!(updated.deductions, Decimal::ZERO);
        assert_eq!(updated.final_hand_salary, dec("9000"));
        assert!(service.ledger_lines(record.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_force_regenerate_discards_override() {
        let (service, store) =
            service_with(vec![standard_employee("emp_001")], vec![absent("emp_001", 3)]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        service
            .override_adjustments(record.id, dec("100"), dec("50"))
            .await
            .unwrap();
        store
            .upsert_employee(employee("emp_001", "30000", "15000", "15000"))
            .await;

        let regenerated = service.force_regenerate("emp_001", march()).await.unwrap();

        assert_eq!(regenerated.id, record.id);
        assert_eq!(regenerated.base_salary, dec("30000"));
        assert_eq!(regenerated.deductions, dec("1000.00"));
        assert_eq!(regenerated.additions, Decimal::ZERO);
        assert_eq!(regenerated.final_hand_salary, dec("14000.00"));
        assert_eq!(regenerated.total_salary, dec("45000"));
    }

    #[tokio::test]
    async fn test_failed_regeneration_leaves_record_and_ledger_untouched() {
        let (service, store) =
            service_with(vec![standard_employee("emp_001")], vec![absent("emp_001", 3)]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        let before = service.recalculate_record(record.id).await.unwrap();
        let lines_before = service.ledger_lines(record.id).await.unwrap();
        store.fail_attendance_for("emp_001").await;

        let result = service.force_regenerate("emp_001", march()).await;

        assert!(matches!(result, Err(PayrollError::Persistence { .. })));
        let after = service.get_record(record.id).await.unwrap();
        let lines_after = service.ledger_lines(record.id).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(lines_after, lines_before);
        let ledger_sum: Decimal = lines_after.iter().map(|l| l.amount).sum();
        assert_eq!(after.deductions, round2(ledger_sum));
    }

    #[tokio::test]
    async fn test_regenerate_removed_employee_keeps_record() {
        let (service, store) =
            service_with(vec![standard_employee("emp_001")], vec![absent("emp_001", 3)]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        let before = service.recalculate_record(record.id).await.unwrap();
        store.remove_employee("emp_001").await;

        let result = service.force_regenerate("emp_001", march()).await;

        assert!(matches!(result, Err(PayrollError::EmployeeNotFound { .. })));
        assert_eq!(service.get_record(record.id).await.unwrap(), before);
    }

    fn assert_totals_hold(record: &PayrollRecord, bonus: Decimal) {
        assert_eq!(record.attendance_bonus, bonus);
        assert_eq!(
            record.total_salary,
            record.base_salary + record.bank_salary + bonus
        );
        assert_eq!(
            record.final_hand_salary,
            round2(record.hand_salary - record.deductions + record.additions)
        );
    }

    #[tokio::test]
    async fn test_total_salary_tracks_bonus_not_adjustments() {
        let mut with_bonus = standard_employee("emp_001");
        with_bonus.has_attendance_bonus = true;
        with_bonus.attendance_bonus = dec("500");
        let (service, _) = service_with(
            vec![with_bonus],
            vec![absent("emp_001", 3), holiday_worked("emp_001", 4), holiday_worked("emp_001", 5)],
        );

        let record = service.ensure_record("emp_001", march()).await.unwrap();
        assert_totals_hold(&record, dec("500"));
        assert_eq!(record.total_salary, dec("27500"));

        let recalculated = service.recalculate_record(record.id).await.unwrap();
        assert_eq!(recalculated.deductions, dec("600.00"));
        assert_eq!(recalculated.additions, dec("1200.00"));
        assert_totals_hold(&recalculated, dec("500"));
        assert_eq!(recalculated.total_salary, dec("27500"));

        let overridden = service
            .override_adjustments(record.id, dec("1234.56"), dec("10"))
            .await
            .unwrap();
        assert_totals_hold(&overridden, dec("500"));
        assert_eq!(overridden.final_hand_salary, dec("7775.44"));

        let ids = vec!["emp_001".to_string()];
        let outcome = service.apply_bonus(&ids, march(), dec("300")).await.unwrap();
        assert_totals_hold(&outcome.succeeded[0], dec("300"));

        let recalculated = service.recalculate_record(record.id).await.unwrap();
        assert_totals_hold(&recalculated, dec("300"));
        assert_eq!(recalculated.total_salary, dec("27300"));
        assert_eq!(recalculated.final_hand_salary, dec("9600.00"));

        let regenerated = service.force_regenerate("emp_001", march()).await.unwrap();
        assert_totals_hold(&regenerated, dec("500"));
        assert_eq!(regenerated.total_salary, dec("27500"));
        assert_eq!(regenerated.final_hand_salary, dec("9600.00"));
    }

    #[tokio::test]
    async fn test_force_regenerate_creates_missing_record() {
        let (service, _) =
            service_with(vec![standard_employee("emp_001")], vec![absent("emp_001", 3)]);

        let record = service.force_regenerate("emp_001", march()).await.unwrap();

        assert_eq!(record.deductions, dec("600.00"));
    }

    #[tokio::test]
    async fn test_force_regenerate_payrolls_reports_unknown_employee() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let ids = vec!["emp_001".to_string(), "ghost".to_string()];

        let outcome = service.force_regenerate_payrolls(march(), &ids).await;

        assert_eq!(outcome.succeeded.len(), 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].employee_id, "ghost");
    }

    #[tokio::test]
    async fn test_generate_period_skips_inactive_employees() {
        let mut inactive = standard_employee("emp_002");
        inactive.is_active = false;
        let (service, _) = service_with(
            vec![standard_employee("emp_001"), inactive],
            vec![absent("emp_001", 3)],
        );

        let outcome = service.generate_period(march()).await.unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.succeeded.len(), 1);
        assert_eq!(outcome.succeeded[0].deductions, dec("600.00"));
    }

    #[tokio::test]
    async fn test_recalculate_all_collects_failures() {
        let (service, store) = service_with(
            vec![standard_employee("emp_001"), standard_employee("emp_002")],
            vec![absent("emp_001", 3), absent("emp_002", 4)],
        );
        service.generate_period(march()).await.unwrap();
        store.fail_attendance_for("emp_002").await;

        let outcome = service.recalculate_all(march()).await.unwrap();

        assert_eq!(outcome.succeeded.len(), 1);
        assert_eq!(outcome.succeeded[0].employee_id, "emp_001");
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].employee_id, "emp_002");
    }

    #[tokio::test]
    async fn test_override_rejects_negative_amounts() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        let result = service
            .override_adjustments(record.id, dec("-1"), Decimal::ZERO)
            .await;

        assert!(matches!(result, Err(PayrollError::InvalidAmount { .. })));
    }

    #[tokio::test]
    async fn test_delete_record_then_lookup_fails() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        service.delete_record(record.id).await.unwrap();

        assert!(matches!(
            service.get_record(record.id).await,
            Err(PayrollError::PayrollRecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_recalculations_serialize() {
        let (service, _) =
            service_with(vec![standard_employee("emp_001")], vec![absent("emp_001", 3)]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.recalculate_record(record.id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = service.get_record(record.id).await.unwrap();
        assert_eq!(record.revision, 8);
        assert_eq!(record.deductions, dec("600.00"));
        assert_eq!(service.ledger_lines(record.id).await.unwrap().len(), 1);
    }
}
