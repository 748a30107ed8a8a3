//! Batch lifecycle: academic-year cohorts and their active -> completed
//! transition.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::commands::batch::{CreateBatchCommand, UpdateBatchCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::batch::{Batch, BatchStatus};
use crate::storage::json::{BatchRepository, JsonConnection};
use crate::storage::traits::BatchStorage;

/// An active batch whose end date has passed is due for completion. Returns
/// the updated batch, or `None` when nothing changes. Date-only comparison;
/// a batch ending today is still active.
pub fn reconcile_batch_status(batch: &Batch, today: NaiveDate) -> Option<Batch> {
    if batch.status != BatchStatus::Active || batch.end_date >= today {
        return None;
    }
    let mut completed = batch.clone();
    completed.status = BatchStatus::Completed;
    completed.updated_at = Utc::now();
    Some(completed)
}

#[derive(Clone)]
pub struct BatchService {
    batches: BatchRepository,
}

impl BatchService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            batches: BatchRepository::new(connection),
        }
    }

    /// Create a batch. At most one active batch at a time is the intent but
    /// not a hard rule; a second active batch is logged and allowed.
    pub fn create_batch(&self, command: CreateBatchCommand) -> DomainResult<Batch> {
        if command.name.trim().is_empty() {
            return Err(DomainError::BatchValidation(
                "Batch name cannot be empty".to_string(),
            ));
        }
        if command.end_date <= command.start_date {
            return Err(DomainError::BatchValidation(
                "Batch end date must be after its start date".to_string(),
            ));
        }

        let already_active = self
            .batches
            .list_batches()?
            .iter()
            .any(|b| b.status == BatchStatus::Active);
        if already_active {
            warn!(
                "Creating batch {} while another batch is still active",
                command.name
            );
        }

        let now = Utc::now();
        let batch = Batch {
            id: Batch::generate_id(),
            name: command.name.trim().to_string(),
            start_date: command.start_date,
            end_date: command.end_date,
            status: BatchStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.batches.store_batch(&batch)?;

        info!("Created batch {} ({})", batch.name, batch.id);
        Ok(batch)
    }

    pub fn get_batch(&self, batch_id: &str) -> DomainResult<Batch> {
        self.batches
            .get_batch(batch_id)?
            .ok_or_else(|| DomainError::BatchNotFound(batch_id.to_string()))
    }

    /// List all batches, completing any active batch whose end date has
    /// passed. This runs on every listing rather than in the background: a
    /// batch past its end date stays active until somebody next looks.
    pub fn list_batches(&self) -> DomainResult<Vec<Batch>> {
        self.list_batches_as_of(Local::now().date_naive())
    }

    pub fn list_batches_as_of(&self, today: NaiveDate) -> DomainResult<Vec<Batch>> {
        let mut batches = self.batches.list_batches()?;
        for batch in &mut batches {
            if let Some(completed) = reconcile_batch_status(batch, today) {
                info!(
                    "Batch {} passed its end date {}; marking completed",
                    completed.name, completed.end_date
                );
                self.batches.update_batch(&completed)?;
                *batch = completed;
            }
        }
        Ok(batches)
    }

    pub fn update_batch(&self, command: UpdateBatchCommand) -> DomainResult<Batch> {
        let mut batch = self.get_batch(&command.batch_id)?;

        if let Some(name) = command.name {
            batch.name = name.trim().to_string();
        }
        if let Some(start_date) = command.start_date {
            batch.start_date = start_date;
        }
        if let Some(end_date) = command.end_date {
            batch.end_date = end_date;
        }
        if let Some(status) = command.status {
            batch.status = status;
        }

        if batch.name.is_empty() {
            return Err(DomainError::BatchValidation(
                "Batch name cannot be empty".to_string(),
            ));
        }
        if batch.end_date <= batch.start_date {
            return Err(DomainError::BatchValidation(
                "Batch end date must be after its start date".to_string(),
            ));
        }

        batch.updated_at = Utc::now();
        self.batches.update_batch(&batch)?;

        info!("Updated batch {} ({})", batch.name, batch.id);
        Ok(batch)
    }

    pub fn delete_batch(&self, batch_id: &str) -> DomainResult<()> {
        if !self.batches.delete_batch(batch_id)? {
            return Err(DomainError::BatchNotFound(batch_id.to_string()));
        }
        info!("Deleted batch {}", batch_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup_test_service() -> (BatchService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (BatchService::new(connection), temp_dir)
    }

    fn batch_2324(status: BatchStatus) -> Batch {
        let now = Utc::now();
        Batch {
            id: "batch-1".to_string(),
            name: "2023-2024".to_string(),
            start_date: d("2023-04-01"),
            end_date: d("2024-01-01"),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn past_end_date_completes_an_active_batch() {
        let batch = batch_2324(BatchStatus::Active);
        let updated = reconcile_batch_status(&batch, d("2025-01-01")).unwrap();
        assert_eq!(updated.status, BatchStatus::Completed);
    }

    #[test]
    fn future_end_date_is_a_no_op() {
        let batch = batch_2324(BatchStatus::Active);
        assert!(reconcile_batch_status(&batch, d("2023-01-01")).is_none());
        // Ending today is not yet past.
        assert!(reconcile_batch_status(&batch, d("2024-01-01")).is_none());
    }

    #[test]
    fn completed_batches_are_left_alone() {
        let batch = batch_2324(BatchStatus::Completed);
        assert!(reconcile_batch_status(&batch, d("2025-01-01")).is_none());
    }

    #[test]
    fn listing_completes_overdue_batches_and_persists() {
        let (service, _tmp) = setup_test_service();
        service
            .create_batch(CreateBatchCommand {
                name: "2023-2024".to_string(),
                start_date: d("2023-04-01"),
                end_date: d("2024-03-31"),
            })
            .unwrap();
        service
            .create_batch(CreateBatchCommand {
                name: "2025-2026".to_string(),
                start_date: d("2025-04-01"),
                end_date: d("2026-03-31"),
            })
            .unwrap();

        let batches = service.list_batches_as_of(d("2025-06-01")).unwrap();
        let old = batches.iter().find(|b| b.name == "2023-2024").unwrap();
        let current = batches.iter().find(|b| b.name == "2025-2026").unwrap();
        assert_eq!(old.status, BatchStatus::Completed);
        assert_eq!(current.status, BatchStatus::Active);

        // The transition was persisted, not just reported.
        let reloaded = service.get_batch(&old.id).unwrap();
        assert_eq!(reloaded.status, BatchStatus::Completed);
    }

    #[test]
    fn second_active_batch_is_allowed() {
        let (service, _tmp) = setup_test_service();
        service
            .create_batch(CreateBatchCommand {
                name: "2025-2026".to_string(),
                start_date: d("2025-04-01"),
                end_date: d("2026-03-31"),
            })
            .unwrap();
        // Intended to be unique, but only warned about.
        let second = service
            .create_batch(CreateBatchCommand {
                name: "2026-2027".to_string(),
                start_date: d("2026-04-01"),
                end_date: d("2027-03-31"),
            })
            .unwrap();
        assert_eq!(second.status, BatchStatus::Active);
    }

    #[test]
    fn create_batch_validates_name_and_dates() {
        let (service, _tmp) = setup_test_service();
        let err = service
            .create_batch(CreateBatchCommand {
                name: " ".to_string(),
                start_date: d("2025-04-01"),
                end_date: d("2026-03-31"),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::BatchValidation(_)));

        let err = service
            .create_batch(CreateBatchCommand {
                name: "2025-2026".to_string(),
                start_date: d("2026-03-31"),
                end_date: d("2025-04-01"),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::BatchValidation(_)));
    }

    #[test]
    fn update_and_delete_batch() {
        let (service, _tmp) = setup_test_service();
        let batch = service
            .create_batch(CreateBatchCommand {
                name: "2025-2026".to_string(),
                start_date: d("2025-04-01"),
                end_date: d("2026-03-31"),
            })
            .unwrap();

        let updated = service
            .update_batch(UpdateBatchCommand {
                batch_id: batch.id.clone(),
                status: Some(BatchStatus::Completed),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.status, BatchStatus::Completed);

        service.delete_batch(&batch.id).unwrap();
        let err = service.delete_batch(&batch.id).unwrap_err();
        assert!(matches!(err, DomainError::BatchNotFound(_)));
    }
}
