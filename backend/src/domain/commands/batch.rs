use chrono::NaiveDate;

use crate::domain::models::batch::BatchStatus;

#[derive(Debug, Clone)]
pub struct CreateBatchCommand {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBatchCommand {
    pub batch_id: String,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BatchStatus>,
}
