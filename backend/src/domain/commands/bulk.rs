//! Per-item outcome reporting for bulk operations.
//!
//! Bulk runs never throw on the first failure: each target is attempted and
//! persisted independently, and callers see exactly which items landed.
//! There is no rollback — items applied before a failure stay applied.

use serde::Serialize;

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BulkItemOutcome {
    Applied {
        student_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        challan_id: Option<String>,
    },
    /// The item needed no work (e.g. the challan was already paid).
    Skipped {
        student_id: String,
        challan_id: String,
        reason: String,
    },
    Failed {
        student_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        challan_id: Option<String>,
        error: String,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkReport {
    pub items: Vec<BulkItemOutcome>,
}

impl BulkReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_applied(&mut self, student_id: &str, challan_id: Option<String>) {
        self.items.push(BulkItemOutcome::Applied {
            student_id: student_id.to_string(),
            challan_id,
        });
    }

    pub fn push_skipped(&mut self, student_id: &str, challan_id: &str, reason: &str) {
        self.items.push(BulkItemOutcome::Skipped {
            student_id: student_id.to_string(),
            challan_id: challan_id.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn push_failed(&mut self, student_id: &str, challan_id: Option<String>, error: &DomainError) {
        self.items.push(BulkItemOutcome::Failed {
            student_id: student_id.to_string(),
            challan_id,
            error: error.to_string(),
        });
    }

    pub fn applied_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, BulkItemOutcome::Applied { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, BulkItemOutcome::Failed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, BulkItemOutcome::Skipped { .. }))
            .count()
    }
}
