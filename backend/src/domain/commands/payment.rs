use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub student_id: String,
    pub challan_id: String,
    pub payment_method: String,
    /// Defaults to today when absent.
    pub payment_date: Option<NaiveDate>,
    pub discount_amount: Option<f64>,
    pub discount_reason: Option<String>,
    /// Overrides the computed credit (amount - discount + fine) when supplied.
    pub actual_amount_paid: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct BulkPaymentItem {
    pub student_id: String,
    pub challan_id: String,
    pub payment_method: String,
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct BulkRecordPaymentsCommand {
    pub payments: Vec<BulkPaymentItem>,
}
