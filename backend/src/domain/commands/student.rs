use crate::domain::models::student::StudentStatus;

#[derive(Debug, Clone)]
pub struct CreateStudentCommand {
    pub name: String,
    pub father_name: String,
    pub class_name: String,
    pub section: Option<String>,
    pub roll_number: Option<String>,
    pub academic_year: String,
    pub monthly_fees: f64,
    pub admission_fees: f64,
    pub total_fees: f64,
    pub family_id: Option<String>,
}

/// Partial student update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateStudentCommand {
    pub student_id: String,
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub roll_number: Option<String>,
    pub academic_year: Option<String>,
    pub status: Option<StudentStatus>,
    pub monthly_fees: Option<f64>,
    pub admission_fees: Option<f64>,
    pub total_fees: Option<f64>,
    pub family_id: Option<String>,
}
