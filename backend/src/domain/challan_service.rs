//! Challan factory: generates pending fee challans, singly or in bulk.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::calendar;
use crate::domain::commands::bulk::BulkReport;
use crate::domain::commands::challan::{BulkGenerateChallansCommand, GenerateChallanCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::challan::{Challan, ChallanState, ChallanType};
use crate::domain::models::student::Student;
use crate::storage::json::{JsonConnection, StudentRepository};
use crate::storage::traits::StudentStorage;

/// A student gets at most this many monthly challans per academic year.
pub const MAX_MONTHLY_CHALLANS_PER_YEAR: usize = 12;

#[derive(Clone)]
pub struct ChallanService {
    students: StudentRepository,
}

impl ChallanService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            students: StudentRepository::new(connection),
        }
    }

    /// Generate one challan and persist the whole student record.
    ///
    /// The challan's academic year is the student's current batch membership;
    /// it is not derived from the billing month. Monthly challans are checked
    /// for duplicates (same display month and year) and the 12-per-year cap;
    /// admission challans are one-off and bypass both checks.
    pub fn generate_challan(&self, command: GenerateChallanCommand) -> DomainResult<Student> {
        let mut student = self
            .students
            .get_student(&command.student_id)?
            .ok_or_else(|| DomainError::StudentNotFound(command.student_id.clone()))?;

        let challan = self.build_challan(&student, &command)?;
        info!(
            "Generated {} challan {} for student {} ({})",
            match challan.challan_type {
                ChallanType::Monthly => "monthly",
                ChallanType::Admission => "admission",
            },
            challan.month,
            student.name,
            student.id
        );

        student.fees_history.push(challan);
        student.updated_at = Utc::now();
        self.students.update_student(&student)?;
        Ok(student)
    }

    /// Apply one challan template across many students. Each student is
    /// validated and persisted independently; one failure does not stop or
    /// roll back the others. When the template carries no amount, each
    /// student is billed their own monthly fee.
    pub fn bulk_generate(&self, command: BulkGenerateChallansCommand) -> DomainResult<BulkReport> {
        info!(
            "Bulk challan generation for {} students, month {}",
            command.student_ids.len(),
            command.month
        );

        let mut report = BulkReport::new();
        for student_id in &command.student_ids {
            let single = GenerateChallanCommand {
                student_id: student_id.clone(),
                month: command.month.clone(),
                amount: command.amount,
                due_date: command.due_date,
                challan_type: ChallanType::Monthly,
                description: command.description.clone(),
            };
            match self.generate_challan(single) {
                Ok(student) => {
                    let challan_id = student.fees_history.last().map(|c| c.id.clone());
                    report.push_applied(student_id, challan_id);
                }
                Err(e) => {
                    warn!("Bulk challan generation failed for {}: {}", student_id, e);
                    report.push_failed(student_id, None, &e);
                }
            }
        }

        info!(
            "Bulk challan generation done: {} applied, {} failed",
            report.applied_count(),
            report.failed_count()
        );
        Ok(report)
    }

    fn build_challan(
        &self,
        student: &Student,
        command: &GenerateChallanCommand,
    ) -> DomainResult<Challan> {
        let month = calendar::month_display(&command.month)?;
        let academic_year = student.academic_year.clone();

        if command.challan_type == ChallanType::Monthly {
            if student.has_monthly_challan(&month, &academic_year) {
                return Err(DomainError::DuplicateChallan {
                    month,
                    academic_year,
                });
            }
            if student.monthly_challan_count(&academic_year) >= MAX_MONTHLY_CHALLANS_PER_YEAR {
                return Err(DomainError::ChallanLimitExceeded { academic_year });
            }
        }

        let amount = command.amount.unwrap_or(match command.challan_type {
            ChallanType::Monthly => student.monthly_fees,
            ChallanType::Admission => student.admission_fees,
        });

        Ok(Challan {
            id: Challan::generate_id(),
            month,
            amount,
            due_date: command.due_date,
            challan_type: command.challan_type,
            academic_year,
            description: command.description.clone(),
            state: ChallanState::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::domain::commands::student::CreateStudentCommand;
    use crate::domain::student_service::StudentService;

    fn setup_test_services() -> (ChallanService, StudentService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (
            ChallanService::new(connection.clone()),
            StudentService::new(connection),
            temp_dir,
        )
    }

    fn admit_student(students: &StudentService, name: &str) -> Student {
        students
            .create_student(CreateStudentCommand {
                name: name.to_string(),
                father_name: "Ahmed Khan".to_string(),
                class_name: "Class 3".to_string(),
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

    fn monthly_command(student_id: &str, month: &str) -> GenerateChallanCommand {
        GenerateChallanCommand {
            student_id: student_id.to_string(),
            month: month.to_string(),
            amount: Some(7500.0),
            due_date: NaiveDate::from_ymd_opt(2025, 11, 30),
            challan_type: ChallanType::Monthly,
            description: None,
        }
    }

    #[test]
    fn generates_pending_challan_with_display_month() {
        let (challans, students, _tmp) = setup_test_services();
        let student = admit_student(&students, "Bilal");

        let updated = challans
            .generate_challan(monthly_command(&student.id, "2025-11"))
            .unwrap();

        assert_eq!(updated.fees_history.len(), 1);
        let challan = &updated.fees_history[0];
        assert_eq!(challan.month, "November 2025");
        assert_eq!(challan.academic_year, "2025-2026");
        assert_eq!(challan.state, ChallanState::Pending);
        // Generation never credits anything.
        assert_eq!(updated.fees_paid, 0.0);

        // The persisted document matches what was returned.
        let reloaded = students.get_student(&student.id).unwrap();
        assert_eq!(reloaded.fees_history, updated.fees_history);
    }

    #[test]
    fn duplicate_month_is_rejected() {
        let (challans, students, _tmp) = setup_test_services();
        let student = admit_student(&students, "Bilal");

        challans
            .generate_challan(monthly_command(&student.id, "2025-11"))
            .unwrap();
        let err = challans
            .generate_challan(monthly_command(&student.id, "2025-11"))
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateChallan { .. }));

        // A different month is still fine.
        challans
            .generate_challan(monthly_command(&student.id, "2025-12"))
            .unwrap();
    }

    #[test]
    fn thirteenth_monthly_challan_is_rejected() {
        let (challans, students, _tmp) = setup_test_services();
        let student = admit_student(&students, "Bilal");

        // Academic year counting does not care which calendar year the months
        // fall in, so spanning 2025-04 .. 2026-03 exercises the real case.
        let months = [
            "2025-04", "2025-05", "2025-06", "2025-07", "2025-08", "2025-09", "2025-10",
            "2025-11", "2025-12", "2026-01", "2026-02", "2026-03",
        ];
        for month in months {
            challans
                .generate_challan(monthly_command(&student.id, month))
                .unwrap();
        }

        let err = challans
            .generate_challan(monthly_command(&student.id, "2026-04"))
            .unwrap_err();
        assert!(matches!(err, DomainError::ChallanLimitExceeded { .. }));
    }

    #[test]
    fn admission_challan_bypasses_monthly_checks() {
        let (challans, students, _tmp) = setup_test_services();
        let student = admit_student(&students, "Bilal");

        let mut cmd = monthly_command(&student.id, "2025-11");
        cmd.challan_type = ChallanType::Admission;
        cmd.amount = None;
        let updated = challans.generate_challan(cmd).unwrap();

        // Falls back to the admission fee, and does not block the monthly
        // challan for the same month.
        assert_eq!(updated.fees_history[0].amount, 15000.0);
        challans
            .generate_challan(monthly_command(&student.id, "2025-11"))
            .unwrap();
    }

    #[test]
    fn bulk_generate_reports_per_student_outcomes() {
        let (challans, students, _tmp) = setup_test_services();
        let a = admit_student(&students, "Bilal");
        let b = admit_student(&students, "Sana");

        // Give b a November challan up front so the bulk run hits a duplicate.
        challans
            .generate_challan(monthly_command(&b.id, "2025-11"))
            .unwrap();

        let report = challans
            .bulk_generate(BulkGenerateChallansCommand {
                student_ids: vec![a.id.clone(), b.id.clone(), "student-missing".to_string()],
                month: "2025-11".to_string(),
                amount: None,
                due_date: NaiveDate::from_ymd_opt(2025, 11, 30),
                description: Some("November tuition".to_string()),
            })
            .unwrap();

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.applied_count(), 1);
        assert_eq!(report.failed_count(), 2);

        // The successful student was persisted even though later items failed.
        let reloaded = students.get_student(&a.id).unwrap();
        assert_eq!(reloaded.fees_history.len(), 1);
        // No template amount: billed the student's own monthly fee.
        assert_eq!(reloaded.fees_history[0].amount, 7500.0);
    }
}
