//! Student record management: admission, updates and family grouping.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::commands::student::{CreateStudentCommand, UpdateStudentCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::family::FamilyGroup;
use crate::domain::models::student::{Student, StudentStatus};
use crate::storage::json::{JsonConnection, StudentRepository};
use crate::storage::traits::StudentStorage;

#[derive(Clone)]
pub struct StudentService {
    students: StudentRepository,
}

impl StudentService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            students: StudentRepository::new(connection),
        }
    }

    /// Admit a new student. Students start as `Studying` with an empty fee
    /// history and nothing paid.
    pub fn create_student(&self, command: CreateStudentCommand) -> DomainResult<Student> {
        info!("Creating student: name={}, class={}", command.name, command.class_name);

        self.validate_create_command(&command)?;
        if let Some(roll) = &command.roll_number {
            self.check_roll_number_conflict(roll, &command.class_name, &command.academic_year, None)?;
        }

        let now = Utc::now();
        let student = Student {
            id: Student::generate_id(),
            name: command.name.trim().to_string(),
            father_name: command.father_name.trim().to_string(),
            class_name: command.class_name.trim().to_string(),
            section: command.section,
            roll_number: command.roll_number,
            academic_year: command.academic_year,
            status: StudentStatus::Studying,
            monthly_fees: command.monthly_fees,
            admission_fees: command.admission_fees,
            total_fees: command.total_fees,
            fees_paid: 0.0,
            fees_history: Vec::new(),
            family_id: command.family_id,
            class_in_which_left: None,
            date_of_leaving: None,
            reason_of_leaving: None,
            created_at: now,
            updated_at: now,
        };

        self.students.store_student(&student)?;
        info!("Created student {} with ID {}", student.name, student.id);
        Ok(student)
    }

    pub fn get_student(&self, student_id: &str) -> DomainResult<Student> {
        self.students
            .get_student(student_id)?
            .ok_or_else(|| DomainError::StudentNotFound(student_id.to_string()))
    }

    pub fn list_students(&self) -> DomainResult<Vec<Student>> {
        Ok(self.students.list_students()?)
    }

    /// Apply a partial update. The fee ledger (`fees_paid`, `fees_history`)
    /// is deliberately not reachable from here; only the challan and payment
    /// services touch it.
    pub fn update_student(&self, command: UpdateStudentCommand) -> DomainResult<Student> {
        info!("Updating student: {}", command.student_id);

        let mut student = self.get_student(&command.student_id)?;

        if let Some(name) = command.name {
            student.name = name.trim().to_string();
        }
        if let Some(father_name) = command.father_name {
            student.father_name = father_name.trim().to_string();
        }
        if let Some(class_name) = command.class_name {
            student.class_name = class_name.trim().to_string();
        }
        if let Some(section) = command.section {
            student.section = Some(section);
        }
        if let Some(roll_number) = command.roll_number {
            student.roll_number = Some(roll_number);
        }
        if let Some(academic_year) = command.academic_year {
            student.academic_year = academic_year;
        }
        if let Some(status) = command.status {
            student.status = status;
        }
        if let Some(monthly_fees) = command.monthly_fees {
            student.monthly_fees = monthly_fees;
        }
        if let Some(admission_fees) = command.admission_fees {
            student.admission_fees = admission_fees;
        }
        if let Some(total_fees) = command.total_fees {
            student.total_fees = total_fees;
        }
        if let Some(family_id) = command.family_id {
            student.family_id = Some(family_id);
        }

        if student.name.is_empty() {
            return Err(DomainError::StudentValidation(
                "Student name cannot be empty".to_string(),
            ));
        }
        if student.class_name.is_empty() {
            return Err(DomainError::StudentValidation(
                "A class assignment is required".to_string(),
            ));
        }
        if let Some(roll) = &student.roll_number {
            self.check_roll_number_conflict(
                roll,
                &student.class_name,
                &student.academic_year,
                Some(&student.id),
            )?;
        }

        student.updated_at = Utc::now();
        self.students.update_student(&student)?;

        info!("Updated student {} ({})", student.name, student.id);
        Ok(student)
    }

    /// Cluster students into families for bulk display and reminders.
    /// Groups by explicit family id, falling back to father name.
    pub fn family_groups(&self) -> DomainResult<Vec<FamilyGroup>> {
        debug!("Grouping students into families");

        let mut groups: BTreeMap<String, Vec<Student>> = BTreeMap::new();
        for student in self.students.list_students()? {
            groups.entry(student.family_key()).or_default().push(student);
        }

        Ok(groups
            .into_iter()
            .map(|(key, students)| FamilyGroup { key, students })
            .collect())
    }

    fn validate_create_command(&self, command: &CreateStudentCommand) -> DomainResult<()> {
        if command.name.trim().is_empty() {
            return Err(DomainError::StudentValidation(
                "Student name cannot be empty".to_string(),
            ));
        }
        if command.class_name.trim().is_empty() {
            return Err(DomainError::StudentValidation(
                "A class assignment is required".to_string(),
            ));
        }
        for (label, value) in [
            ("monthly fees", command.monthly_fees),
            ("admission fees", command.admission_fees),
            ("total fees", command.total_fees),
        ] {
            if value < 0.0 {
                return Err(DomainError::StudentValidation(format!(
                    "{} cannot be negative",
                    label
                )));
            }
        }
        Ok(())
    }

    /// A roll number must be unique within its class and academic year.
    fn check_roll_number_conflict(
        &self,
        roll_number: &str,
        class_name: &str,
        academic_year: &str,
        exclude_student_id: Option<&str>,
    ) -> DomainResult<()> {
        let students = self.students.list_students()?;
        let conflict = students.iter().any(|s| {
            Some(s.id.as_str()) != exclude_student_id
                && s.roll_number.as_deref() == Some(roll_number)
                && s.class_name == class_name
                && s.academic_year == academic_year
        });

        if conflict {
            warn!(
                "Roll number conflict: {} in {} ({})",
                roll_number, class_name, academic_year
            );
            return Err(DomainError::RollNumberConflict {
                roll_number: roll_number.to_string(),
                class_name: class_name.to_string(),
                academic_year: academic_year.to_string(),
            });
        }
        Ok(())
    }
}
