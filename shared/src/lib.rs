//! Wire-level request types shared between the REST surface and its clients.
//!
//! Dates travel as strings (`YYYY-MM-DD`), billing months as `YYYY-MM`;
//! the backend parses and validates them before anything touches a record.

use serde::{Deserialize, Serialize};

/// Request to register a new student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub father_name: String,
    /// Class the student is admitted into, e.g. "Class 3". Required.
    pub class_name: String,
    pub section: Option<String>,
    /// GR number within the class.
    pub roll_number: Option<String>,
    /// Batch name the student belongs to, e.g. "2025-2026".
    pub academic_year: String,
    pub monthly_fees: f64,
    pub admission_fees: f64,
    pub total_fees: f64,
    /// Groups siblings; father name is used as a fallback key when absent.
    pub family_id: Option<String>,
}

/// Partial update of a student record. Only the provided fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub roll_number: Option<String>,
    pub academic_year: Option<String>,
    /// One of "studying", "left", "passed_out".
    pub status: Option<String>,
    pub monthly_fees: Option<f64>,
    pub admission_fees: Option<f64>,
    pub total_fees: Option<f64>,
    pub family_id: Option<String>,
}

/// Request to generate a fee challan for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateChallanRequest {
    /// Billing month as `YYYY-MM`.
    pub month: String,
    /// Falls back to the student's monthly fee when absent.
    pub amount: Option<f64>,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// "monthly" (default) or "admission".
    pub challan_type: Option<String>,
    pub description: Option<String>,
}

/// Request to generate the same challan template across many students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkGenerateChallansRequest {
    pub student_ids: Vec<String>,
    pub month: String,
    /// When absent each student is billed their own monthly fee.
    pub amount: Option<f64>,
    pub due_date: Option<String>,
    pub description: Option<String>,
}

/// Request to record payment of a single challan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub payment_method: String,
    /// `YYYY-MM-DD`; defaults to today.
    pub payment_date: Option<String>,
    pub discount_amount: Option<f64>,
    pub discount_reason: Option<String>,
    /// Overrides the computed credit (amount - discount + fine) when supplied.
    pub actual_amount_paid: Option<f64>,
}

/// One challan to mark paid in a bulk payment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkPaymentItemRequest {
    pub student_id: String,
    pub challan_id: String,
    pub payment_method: String,
    pub payment_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRecordPaymentsRequest {
    pub payments: Vec<BulkPaymentItemRequest>,
}

/// Request to promote a set of students into a target academic year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoteStudentsRequest {
    pub student_ids: Vec<String>,
    pub target_academic_year: String,
}

/// Request to create a batch (academic-year cohort).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBatchRequest {
    /// e.g. "2025-2026"
    pub name: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
}

/// Partial update of a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBatchRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// "active" or "completed".
    pub status: Option<String>,
}
