//! JSON-document batch repository.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use super::connection::JsonConnection;
use crate::domain::models::batch::Batch;
use crate::storage::traits::BatchStorage;

#[derive(Clone)]
pub struct BatchRepository {
    connection: Arc<JsonConnection>,
}

impl BatchRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    fn batch_path(&self, batch_id: &str) -> PathBuf {
        self.connection
            .batches_directory()
            .join(format!("{}.json", batch_id))
    }

    fn save_batch(&self, batch: &Batch) -> Result<()> {
        let dir = self.connection.batches_directory();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = self.batch_path(&batch.id);
        let json = serde_json::to_string_pretty(batch)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved batch {} to {:?}", batch.id, path);
        Ok(())
    }
}

impl BatchStorage for BatchRepository {
    fn store_batch(&self, batch: &Batch) -> Result<()> {
        self.save_batch(batch)?;
        info!("Stored batch {} ({})", batch.name, batch.id);
        Ok(())
    }

    fn get_batch(&self, batch_id: &str) -> Result<Option<Batch>> {
        let path = self.batch_path(batch_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn list_batches(&self) -> Result<Vec<Batch>> {
        let dir = self.connection.batches_directory();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut batches = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path)?;
            match serde_json::from_str::<Batch>(&json) {
                Ok(batch) => batches.push(batch),
                Err(e) => warn!("Skipping unreadable batch document {:?}: {}", path, e),
            }
        }

        batches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(batches)
    }

    fn update_batch(&self, batch: &Batch) -> Result<()> {
        let path = self.batch_path(&batch.id);
        if !path.exists() {
            warn!("Attempted to update a non-existent batch: {}", batch.id);
            return Err(anyhow!("Batch not found for update: {}", batch.id));
        }
        self.save_batch(batch)
    }

    fn delete_batch(&self, batch_id: &str) -> Result<bool> {
        let path = self.batch_path(batch_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        info!("Deleted batch document {:?}", path);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    use crate::domain::models::batch::BatchStatus;

    fn setup_test_repo() -> (BatchRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (BatchRepository::new(Arc::new(connection)), temp_dir)
    }

    fn sample_batch(id: &str, name: &str) -> Batch {
        let now = Utc::now();
        Batch {
            id: id.to_string(),
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            status: BatchStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn store_list_and_delete_batch() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_batch(&sample_batch("batch-1", "2025-2026")).unwrap();
        repo.store_batch(&sample_batch("batch-2", "2024-2025")).unwrap();

        let batches = repo.list_batches().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].name, "2024-2025");

        assert!(repo.delete_batch("batch-1").unwrap());
        assert!(!repo.delete_batch("batch-1").unwrap());
        assert_eq!(repo.list_batches().unwrap().len(), 1);
    }

    #[test]
    fn get_and_update_batch() {
        let (repo, _temp_dir) = setup_test_repo();
        let mut batch = sample_batch("batch-3", "2023-2024");
        repo.store_batch(&batch).unwrap();

        batch.status = BatchStatus::Completed;
        repo.update_batch(&batch).unwrap();

        let loaded = repo.get_batch("batch-3").unwrap().unwrap();
        assert_eq!(loaded.status, BatchStatus::Completed);

        let missing = sample_batch("batch-missing", "1999-2000");
        assert!(repo.update_batch(&missing).is_err());
    }
}
