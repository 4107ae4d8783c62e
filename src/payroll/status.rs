//! Hand and bank payment flags.

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use super::PayrollService;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PaymentDetails, PaymentField, PayrollRecord, PayrollUpdate};

impl PayrollService {
    /// Sets or clears one payment flag.
    ///
    /// Setting a flag stamps its timestamp with the current time; clearing it
    /// removes the timestamp. Payment details, when given, overwrite the
    /// stored method and reference.
    pub async fn set_payment_status(
        &self,
        record_id: Uuid,
        field: PaymentField,
        paid: bool,
        details: Option<PaymentDetails>,
    ) -> PayrollResult<PayrollRecord> {
        let stamp = paid.then(Utc::now);
        let mut update = PayrollUpdate::default();
        match field {
            PaymentField::Hand => {
                update.is_paid_hand = Some(paid);
                update.paid_hand_at = Some(stamp);
            }
            PaymentField::Bank => {
                update.is_paid_bank = Some(paid);
                update.paid_bank_at = Some(stamp);
            }
        }
        attach_details(&mut update, details);

        self.write_status(record_id, update).await.inspect(|record| {
            info!(record_id = %record.id, field = ?field, paid, status = %record.status(), "Updated payment status")
        })
    }

    /// Marks both portions as paid now.
    pub async fn mark_fully_paid(
        &self,
        record_id: Uuid,
        details: Option<PaymentDetails>,
    ) -> PayrollResult<PayrollRecord> {
        let now = Utc::now();
        let mut update = PayrollUpdate {
            is_paid_hand: Some(true),
            is_paid_bank: Some(true),
            paid_hand_at: Some(Some(now)),
            paid_bank_at: Some(Some(now)),
            ..Default::default()
        };
        attach_details(&mut update, details);

        self.write_status(record_id, update)
            .await
            .inspect(|record| info!(record_id = %record.id, "Marked payroll record fully paid"))
    }

    async fn write_status(
        &self,
        record_id: Uuid,
        update: PayrollUpdate,
    ) -> PayrollResult<PayrollRecord> {
        let result = async {
            let (_guard, record) = self.lock_record(record_id).await?;
            Ok::<_, PayrollError>(
                self.store
                    .update_payroll_record(record.id, record.revision, update)
                    .await?,
            )
        }
        .await;
        result.inspect_err(|e| {
            error!(record_id = %record_id, error = %e, "Failed to update payment status")
        })
    }
}

fn attach_details(update: &mut PayrollUpdate, details: Option<PaymentDetails>) {
    let Some(details) = details else {
        return;
    };
    // Omitted details keep whatever the record already holds.
    if let Some(method) = details.method {
        update.payment_method = Some(Some(method));
    }
    if let Some(reference) = details.reference {
        update.payment_reference = Some(Some(reference));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;
    use crate::payroll::fixtures::{march, service_with, standard_employee};

    #[tokio::test]
    async fn test_hand_paid_stamps_timestamp() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        let updated = service
            .set_payment_status(record.id, PaymentField::Hand, true, None)
            .await
            .unwrap();

        assert!(updated.is_paid_hand);
        assert!(updated.paid_hand_at.is_some());
        assert!(!updated.is_paid_bank);
        assert!(updated.paid_bank_at.is_none());
        assert_eq!(updated.status(), PaymentStatus::HandPaid);
    }

    #[tokio::test]
    async fn test_clearing_flag_clears_timestamp() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        service
            .set_payment_status(record.id, PaymentField::Bank, true, None)
            .await
            .unwrap();

        let updated = service
            .set_payment_status(record.id, PaymentField::Bank, false, None)
            .await
            .unwrap();

        assert!(!updated.is_paid_bank);
        assert!(updated.paid_bank_at.is_none());
        assert_eq!(updated.status(), PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_details_are_recorded() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        let details = PaymentDetails {
            method: Some("transfer".to_string()),
            reference: Some("TRX-42".to_string()),
        };

        let updated = service
            .set_payment_status(record.id, PaymentField::Bank, true, Some(details))
            .await
            .unwrap();

        assert_eq!(updated.payment_method.as_deref(), Some("transfer"));
        assert_eq!(updated.payment_reference.as_deref(), Some("TRX-42"));
    }

    #[tokio::test]
    async fn test_partial_details_keep_earlier_method() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();
        let cash = PaymentDetails {
            method: Some("cash".to_string()),
            reference: None,
        };
        service
            .set_payment_status(record.id, PaymentField::Hand, true, Some(cash))
            .await
            .unwrap();

        let reference_only = PaymentDetails {
            method: None,
            reference: Some("TRX-7".to_string()),
        };
        let updated = service
            .mark_fully_paid(record.id, Some(reference_only))
            .await
            .unwrap();

        assert_eq!(updated.payment_method.as_deref(), Some("cash"));
        assert_eq!(updated.payment_reference.as_deref(), Some("TRX-7"));

        let cleared = service
            .set_payment_status(record.id, PaymentField::Bank, false, None)
            .await
            .unwrap();
        assert_eq!(cleared.payment_method.as_deref(), Some("cash"));
        assert_eq!(cleared.payment_reference.as_deref(), Some("TRX-7"));
    }

    #[tokio::test]
    async fn test_mark_fully_paid() {
        let (service, _) = service_with(vec![standard_employee("emp_001")], vec![]);
        let record = service.ensure_record("emp_001", march()).await.unwrap();

        let updated = service.mark_fully_paid(record.id, None).await.unwrap();

        assert!(updated.is_fully_paid());
        assert_eq!(updated.paid_hand_at, updated.paid_bank_at);
        assert_eq!(updated.status(), PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_unknown_record() {
        let (service, _) = service_with(vec![], vec![]);

        let result = service
            .set_payment_status(Uuid::new_v4(), PaymentField::Hand, true, None)
            .await;

        assert!(matches!(result, Err(PayrollError::PayrollRecordNotFound { .. })));
    }
}
