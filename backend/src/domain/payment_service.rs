//! Payment applicator: settles challans and accumulates the student ledger.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::commands::bulk::BulkReport;
use crate::domain::commands::payment::{
    BulkPaymentItem, BulkRecordPaymentsCommand, RecordPaymentCommand,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::fine::compute_fine;
use crate::domain::models::challan::ChallanState;
use crate::domain::models::student::Student;
use crate::storage::json::{JsonConnection, StudentRepository};
use crate::storage::traits::StudentStorage;

#[derive(Clone)]
pub struct PaymentService {
    students: StudentRepository,
}

impl PaymentService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            students: StudentRepository::new(connection),
        }
    }

    /// Record payment of one challan and persist the whole student record.
    ///
    /// The credited amount is `actual_amount_paid` when the caller supplies
    /// it, otherwise `amount - discount + fine`. `fees_paid` accumulates
    /// incrementally; it is never recomputed from the history. There is no
    /// already-paid guard on this path: replaying the same payment credits
    /// the ledger again (callers needing idempotency use the bulk path).
    pub fn record_payment(&self, command: RecordPaymentCommand) -> DomainResult<Student> {
        let mut student = self
            .students
            .get_student(&command.student_id)?
            .ok_or_else(|| DomainError::StudentNotFound(command.student_id.clone()))?;

        let payment_date = command
            .payment_date
            .unwrap_or_else(|| Local::now().date_naive());

        let credited = Self::apply_payment(
            &mut student,
            &command.challan_id,
            &command.payment_method,
            payment_date,
            command.discount_amount.unwrap_or(0.0),
            command.discount_reason.clone(),
            command.actual_amount_paid,
        )?;

        student.updated_at = Utc::now();
        self.students.update_student(&student)?;

        info!(
            "Recorded payment of {} against challan {} for student {} ({})",
            credited, command.challan_id, student.name, student.id
        );
        Ok(student)
    }

    /// Mark a set of challans paid across many students. Items are grouped
    /// by student, applied within that student's record in one accumulated
    /// update, and persisted once per affected student. Challans already
    /// marked paid are skipped, so re-running a bulk payment is harmless at
    /// the per-challan level.
    pub fn bulk_record_payments(
        &self,
        command: BulkRecordPaymentsCommand,
    ) -> DomainResult<BulkReport> {
        info!("Bulk payment run over {} items", command.payments.len());

        let mut report = BulkReport::new();
        for (student_id, items) in group_by_student(command.payments) {
            self.apply_bulk_for_student(&student_id, items, &mut report);
        }

        info!(
            "Bulk payment run done: {} applied, {} skipped, {} failed",
            report.applied_count(),
            report.skipped_count(),
            report.failed_count()
        );
        Ok(report)
    }

    fn apply_bulk_for_student(
        &self,
        student_id: &str,
        items: Vec<BulkPaymentItem>,
        report: &mut BulkReport,
    ) {
        let mut student = match self.students.get_student(student_id) {
            Ok(Some(student)) => student,
            Ok(None) => {
                let err = DomainError::StudentNotFound(student_id.to_string());
                for item in &items {
                    report.push_failed(student_id, Some(item.challan_id.clone()), &err);
                }
                return;
            }
            Err(e) => {
                let err = DomainError::from(e);
                for item in &items {
                    report.push_failed(student_id, Some(item.challan_id.clone()), &err);
                }
                return;
            }
        };

        let mut applied: Vec<String> = Vec::new();
        for item in items {
            match student.challan(&item.challan_id) {
                None => {
                    report.push_failed(
                        student_id,
                        Some(item.challan_id.clone()),
                        &DomainError::ChallanNotFound(item.challan_id.clone()),
                    );
                }
                Some(challan) if challan.is_paid() => {
                    report.push_skipped(student_id, &item.challan_id, "already paid");
                }
                Some(_) => {
                    let payment_date = item
                        .payment_date
                        .unwrap_or_else(|| Local::now().date_naive());
                    match Self::apply_payment(
                        &mut student,
                        &item.challan_id,
                        &item.payment_method,
                        payment_date,
                        0.0,
                        None,
                        None,
                    ) {
                        Ok(_) => applied.push(item.challan_id.clone()),
                        Err(e) => {
                            report.push_failed(student_id, Some(item.challan_id.clone()), &e)
                        }
                    }
                }
            }
        }

        if applied.is_empty() {
            return;
        }

        student.updated_at = Utc::now();
        match self.students.update_student(&student) {
            Ok(()) => {
                for challan_id in applied {
                    report.push_applied(student_id, Some(challan_id));
                }
            }
            Err(e) => {
                warn!("Persisting bulk payments for {} failed: {}", student_id, e);
                let err = DomainError::from(e);
                for challan_id in applied {
                    report.push_failed(student_id, Some(challan_id), &err);
                }
            }
        }
    }

    /// Transition one challan to `Paid` inside the student record and credit
    /// the ledger. Returns the credited amount.
    fn apply_payment(
        student: &mut Student,
        challan_id: &str,
        payment_method: &str,
        payment_date: NaiveDate,
        discount_amount: f64,
        discount_reason: Option<String>,
        actual_amount_paid: Option<f64>,
    ) -> DomainResult<f64> {
        let challan = student
            .challan_mut(challan_id)
            .ok_or_else(|| DomainError::ChallanNotFound(challan_id.to_string()))?;

        let fine_amount = compute_fine(challan.due_date, Some(payment_date));
        let discounted_amount = challan.amount - discount_amount;
        let credited = actual_amount_paid.unwrap_or(challan.amount - discount_amount + fine_amount);

        challan.state = ChallanState::Paid {
            date: payment_date,
            payment_method: payment_method.to_string(),
            fine_amount,
            discount_amount,
            discount_reason,
            discounted_amount,
        };

        student.fees_paid += credited;
        Ok(credited)
    }
}

fn group_by_student(items: Vec<BulkPaymentItem>) -> Vec<(String, Vec<BulkPaymentItem>)> {
    let mut groups: Vec<(String, Vec<BulkPaymentItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(id, _)| *id == item.student_id) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((item.student_id.clone(), vec![item])),
        }
    }
    groups
}
