#[derive(Debug, Clone)]
pub struct PromoteStudentsCommand {
    pub student_ids: Vec<String>,
    /// Batch name the selected students move into, e.g. "2026-2027".
    pub target_academic_year: String,
}
