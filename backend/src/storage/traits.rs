//! Storage abstraction traits.
//!
//! The domain layer only sees these traits, so the document store underneath
//! can change without touching any service. The persistence primitive is the
//! whole document: a student is always written in full, fee history included.

use anyhow::Result;

use crate::domain::models::batch::Batch;
use crate::domain::models::student::Student;

/// Interface for student record storage.
pub trait StudentStorage: Send + Sync {
    /// Store a new student record.
    fn store_student(&self, student: &Student) -> Result<()>;

    /// Retrieve a specific student by ID.
    fn get_student(&self, student_id: &str) -> Result<Option<Student>>;

    /// List all students ordered by name.
    fn list_students(&self) -> Result<Vec<Student>>;

    /// Replace an existing student record in full.
    fn update_student(&self, student: &Student) -> Result<()>;
}

/// Interface for batch storage.
pub trait BatchStorage: Send + Sync {
    /// Store a new batch.
    fn store_batch(&self, batch: &Batch) -> Result<()>;

    /// Retrieve a specific batch by ID.
    fn get_batch(&self, batch_id: &str) -> Result<Option<Batch>>;

    /// List all batches ordered by name.
    fn list_batches(&self) -> Result<Vec<Batch>>;

    /// Replace an existing batch in full.
    fn update_batch(&self, batch: &Batch) -> Result<()>;

    /// Delete a batch by ID. Returns true if a batch was actually removed.
    fn delete_batch(&self, batch_id: &str) -> Result<bool>;
}
