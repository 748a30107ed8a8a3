//! Domain model for a fee challan (invoice/voucher for one billing period).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallanType {
    Admission,
    Monthly,
}

/// Payment state of a challan. The fields that only exist after payment
/// (fine, discount, method) live in the `Paid` variant so they are
/// structurally guaranteed rather than optionally present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChallanState {
    Pending,
    Paid {
        /// Date the payment was received.
        date: NaiveDate,
        payment_method: String,
        /// 0 or the flat late fee.
        fine_amount: f64,
        discount_amount: f64,
        discount_reason: Option<String>,
        /// amount - discount_amount.
        discounted_amount: f64,
    },
}

/// A fee challan, embedded in its owning student's fee history. Challans are
/// never addressed independently on disk; they travel with the student
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challan {
    pub id: String,
    /// Display month, e.g. "November 2025".
    pub month: String,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    pub challan_type: ChallanType,
    /// Batch name of the owning student at generation time.
    pub academic_year: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub state: ChallanState,
}

impl Challan {
    pub fn generate_id() -> String {
        format!("challan-{}", Uuid::new_v4())
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.state, ChallanState::Paid { .. })
    }
}
