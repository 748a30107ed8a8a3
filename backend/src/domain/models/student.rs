//! Domain model for a student record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::challan::{Challan, ChallanType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Studying,
    Left,
    PassedOut,
}

/// A student record. `fees_history` holds the student's challans in creation
/// order; `fees_paid` accumulates every credited payment and is expected to be
/// monotonically non-decreasing under normal operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub father_name: String,
    pub class_name: String,
    pub section: Option<String>,
    /// GR number within the class.
    pub roll_number: Option<String>,
    /// Batch name, e.g. "2025-2026".
    pub academic_year: String,
    pub status: StudentStatus,
    pub monthly_fees: f64,
    pub admission_fees: f64,
    pub total_fees: f64,
    pub fees_paid: f64,
    pub fees_history: Vec<Challan>,
    pub family_id: Option<String>,
    pub class_in_which_left: Option<String>,
    pub date_of_leaving: Option<NaiveDate>,
    pub reason_of_leaving: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn generate_id() -> String {
        format!("student-{}", Uuid::new_v4())
    }

    pub fn challan(&self, challan_id: &str) -> Option<&Challan> {
        self.fees_history.iter().find(|c| c.id == challan_id)
    }

    pub fn challan_mut(&mut self, challan_id: &str) -> Option<&mut Challan> {
        self.fees_history.iter_mut().find(|c| c.id == challan_id)
    }

    /// Number of monthly challans already generated for an academic year.
    pub fn monthly_challan_count(&self, academic_year: &str) -> usize {
        self.fees_history
            .iter()
            .filter(|c| c.challan_type == ChallanType::Monthly && c.academic_year == academic_year)
            .count()
    }

    /// Whether a monthly challan already exists for a display month within an
    /// academic year.
    pub fn has_monthly_challan(&self, month: &str, academic_year: &str) -> bool {
        self.fees_history.iter().any(|c| {
            c.challan_type == ChallanType::Monthly
                && c.month == month
                && c.academic_year == academic_year
        })
    }

    /// Grouping key for family clustering: explicit family id when present,
    /// father name otherwise.
    pub fn family_key(&self) -> String {
        self.family_id
            .clone()
            .unwrap_or_else(|| self.father_name.clone())
    }
}
