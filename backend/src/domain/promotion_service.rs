//! Promotion engine: moves students up the class ladder at year end, or
//! graduates them out of Class 10.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::domain::commands::bulk::BulkReport;
use crate::domain::commands::promotion::PromoteStudentsCommand;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::student::{Student, StudentStatus};
use crate::storage::json::{JsonConnection, StudentRepository};
use crate::storage::traits::StudentStorage;

/// Fixed class ladder, lowest first.
pub const CLASS_PROGRESSION: [&str; 13] = [
    "PG", "Nursery", "KG", "Class 1", "Class 2", "Class 3", "Class 4", "Class 5", "Class 6",
    "Class 7", "Class 8", "Class 9", "Class 10",
];

/// The class after `current`, or `None` when the student is at the top of
/// the ladder (graduates) or the class name is not on it at all.
pub fn next_class(current: &str) -> Option<&'static str> {
    let position = CLASS_PROGRESSION
        .iter()
        .position(|class| *class == current.trim())?;
    CLASS_PROGRESSION.get(position + 1).copied()
}

/// Apply a promotion in place. A student with a next class moves into it
/// under the target academic year; a student with none graduates: marked
/// passed-out with today's date and still reassigned to the target year.
pub fn promote(student: &mut Student, target_academic_year: &str, today: NaiveDate) {
    match next_class(&student.class_name) {
        Some(next) => {
            student.class_name = next.to_string();
        }
        None => {
            student.status = StudentStatus::PassedOut;
            student.class_in_which_left = Some(student.class_name.clone());
            student.date_of_leaving = Some(today);
            student.reason_of_leaving = Some("Graduated".to_string());
        }
    }
    student.academic_year = target_academic_year.to_string();
}

#[derive(Clone)]
pub struct PromotionService {
    students: StudentRepository,
}

impl PromotionService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            students: StudentRepository::new(connection),
        }
    }

    /// Promote one student and persist the record.
    pub fn promote_student(
        &self,
        student_id: &str,
        target_academic_year: &str,
        today: NaiveDate,
    ) -> DomainResult<Student> {
        let mut student = self
            .students
            .get_student(student_id)?
            .ok_or_else(|| DomainError::StudentNotFound(student_id.to_string()))?;

        let previous_class = student.class_name.clone();
        promote(&mut student, target_academic_year, today);
        student.updated_at = chrono::Utc::now();
        self.students.update_student(&student)?;

        match student.status {
            StudentStatus::PassedOut => info!(
                "Graduated student {} ({}) out of {}",
                student.name, student.id, previous_class
            ),
            _ => info!(
                "Promoted student {} ({}) from {} to {}",
                student.name, student.id, previous_class, student.class_name
            ),
        }
        Ok(student)
    }

    /// Promote a selected set of students into the target academic year.
    /// Each promotion is persisted independently; there is no
    /// promote-all-or-none guarantee.
    pub fn promote_students(&self, command: PromoteStudentsCommand) -> DomainResult<BulkReport> {
        info!(
            "Promoting {} students into {}",
            command.student_ids.len(),
            command.target_academic_year
        );

        let today = Local::now().date_naive();
        let mut report = BulkReport::new();
        for student_id in &command.student_ids {
            match self.promote_student(student_id, &command.target_academic_year, today) {
                Ok(_) => report.push_applied(student_id, None),
                Err(e) => {
                    warn!("Promotion failed for {}: {}", student_id, e);
                    report.push_failed(student_id, None, &e);
                }
            }
        }

        info!(
            "Promotion run done: {} applied, {} failed",
            report.applied_count(),
            report.failed_count()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::domain::commands::student::CreateStudentCommand;
    use crate::domain::student_service::StudentService;

    fn setup_test_services() -> (PromotionService, StudentService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (
            PromotionService::new(connection.clone()),
            StudentService::new(connection),
            temp_dir,
        )
    }

    fn admit_student(students: &StudentService, name: &str, class_name: &str) -> Student {
        students
            .create_student(CreateStudentCommand {
                name: name.to_string(),
                father_name: "Ahmed Khan".to_string(),
                class_name: class_name.to_string(),
                section: None,
                roll_number: None,
                academic_year: "2025-2026".to_string(),
                monthly_fees: 7500.0,
                admission_fees: 15000.0,
                total_fees: 90000.0,
                family_id: None,
            })
            .unwrap()
    }

    #[test]
    fn next_class_walks_the_ladder() {
        assert_eq!(next_class("PG"), Some("Nursery"));
        assert_eq!(next_class("Nursery"), Some("KG"));
        assert_eq!(next_class("KG"), Some("Class 1"));
        assert_eq!(next_class("Class 9"), Some("Class 10"));
        assert_eq!(next_class("Class 10"), None);
    }

    #[test]
    fn unknown_class_names_have_no_next_class() {
        assert_eq!(next_class("Class 11"), None);
        assert_eq!(next_class("Montessori"), None);
        assert_eq!(next_class(""), None);
    }

    #[test]
    fn promotion_moves_class_and_year() {
        let (promotions, students, _tmp) = setup_test_services();
        let student = admit_student(&students, "Bilal", "Class 3");

        let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let promoted = promotions
            .promote_student(&student.id, "2026-2027", today)
            .unwrap();

        assert_eq!(promoted.class_name, "Class 4");
        assert_eq!(promoted.academic_year, "2026-2027");
        assert_eq!(promoted.status, StudentStatus::Studying);
        assert!(promoted.date_of_leaving.is_none());
    }

    #[test]
    fn class_ten_graduates_instead_of_promoting() {
        let (promotions, students, _tmp) = setup_test_services();
        let student = admit_student(&students, "Sana", "Class 10");

        let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let graduated = promotions
            .promote_student(&student.id, "2026-2027", today)
            .unwrap();

        assert_eq!(graduated.status, StudentStatus::PassedOut);
        assert_eq!(graduated.class_name, "Class 10");
        assert_eq!(graduated.class_in_which_left.as_deref(), Some("Class 10"));
        assert_eq!(graduated.date_of_leaving, Some(today));
        assert_eq!(graduated.reason_of_leaving.as_deref(), Some("Graduated"));
        assert_eq!(graduated.academic_year, "2026-2027");
    }

    #[test]
    fn bulk_promotion_reports_each_student() {
        let (promotions, students, _tmp) = setup_test_services();
        let a = admit_student(&students, "Bilal", "KG");
        let b = admit_student(&students, "Sana", "Class 10");

        let report = promotions
            .promote_students(PromoteStudentsCommand {
                student_ids: vec![a.id.clone(), b.id.clone(), "student-missing".to_string()],
                target_academic_year: "2026-2027".to_string(),
            })
            .unwrap();

        assert_eq!(report.applied_count(), 2);
        assert_eq!(report.failed_count(), 1);

        // Successful promotions stayed persisted despite the trailing failure.
        assert_eq!(students.get_student(&a.id).unwrap().class_name, "Class 1");
        assert_eq!(
            students.get_student(&b.id).unwrap().status,
            StudentStatus::PassedOut
        );
    }
}
