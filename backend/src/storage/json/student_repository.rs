//! JSON-document student repository.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use super::connection::JsonConnection;
use crate::domain::models::student::Student;
use crate::storage::traits::StudentStorage;

#[derive(Clone)]
pub struct StudentRepository {
    connection: Arc<JsonConnection>,
}

impl StudentRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    fn student_path(&self, student_id: &str) -> PathBuf {
        self.connection
            .students_directory()
            .join(format!("{}.json", student_id))
    }

    /// Write the whole student document, temp file + rename.
    fn save_student(&self, student: &Student) -> Result<()> {
        let dir = self.connection.students_directory();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = self.student_path(&student.id);
        let json = serde_json::to_string_pretty(student)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved student {} to {:?}", student.id, path);
        Ok(())
    }

    fn load_student(&self, path: &PathBuf) -> Result<Student> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Scan the students directory, skipping entries that fail to parse.
    fn discover_students(&self) -> Result<Vec<Student>> {
        let dir = self.connection.students_directory();
        if !dir.exists() {
            debug!("Students directory doesn't exist, returning empty list");
            return Ok(Vec::new());
        }

        let mut students = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.load_student(&path) {
                Ok(student) => students.push(student),
                Err(e) => warn!("Skipping unreadable student document {:?}: {}", path, e),
            }
        }

        students.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Discovered {} students", students.len());
        Ok(students)
    }
}

impl StudentStorage for StudentRepository {
    fn store_student(&self, student: &Student) -> Result<()> {
        self.save_student(student)?;
        info!("Stored student {} ({})", student.name, student.id);
        Ok(())
    }

    fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        let path = self.student_path(student_id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.load_student(&path)?))
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        self.discover_students()
    }

    fn update_student(&self, student: &Student) -> Result<()> {
        let path = self.student_path(&student.id);
        if !path.exists() {
            warn!("Attempted to update a non-existent student: {}", student.id);
            return Err(anyhow!("Student not found for update: {}", student.id));
        }
        self.save_student(student)
    }
}
