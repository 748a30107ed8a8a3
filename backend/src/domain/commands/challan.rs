use chrono::NaiveDate;

use crate::domain::models::challan::ChallanType;

#[derive(Debug, Clone)]
pub struct GenerateChallanCommand {
    pub student_id: String,
    /// `YYYY-MM` month key, normalized to a display month by the factory.
    pub month: String,
    /// Falls back to the student's monthly fee when absent.
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub challan_type: ChallanType,
    pub description: Option<String>,
}

/// One shared template applied independently to each target student.
#[derive(Debug, Clone)]
pub struct BulkGenerateChallansCommand {
    pub student_ids: Vec<String>,
    pub month: String,
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}
