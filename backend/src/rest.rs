//! REST surface: axum handlers over the domain services.
//!
//! Challans are not independently addressable resources; they are reached
//! through their owning student (`/students/:id/challans/...`), matching the
//! whole-document persistence underneath.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use shared::{
    BulkGenerateChallansRequest, BulkRecordPaymentsRequest, CreateBatchRequest,
    CreateStudentRequest, GenerateChallanRequest, PromoteStudentsRequest, RecordPaymentRequest,
    UpdateBatchRequest, UpdateStudentRequest,
};
use tracing::info;

use crate::domain::commands::batch::{CreateBatchCommand, UpdateBatchCommand};
use crate::domain::commands::challan::{BulkGenerateChallansCommand, GenerateChallanCommand};
use crate::domain::commands::payment::{
    BulkPaymentItem, BulkRecordPaymentsCommand, RecordPaymentCommand,
};
use crate::domain::commands::promotion::PromoteStudentsCommand;
use crate::domain::commands::student::{CreateStudentCommand, UpdateStudentCommand};
use crate::domain::models::batch::BatchStatus;
use crate::domain::models::challan::ChallanType;
use crate::domain::models::student::StudentStatus;
use crate::domain::{
    calendar, BatchService, ChallanService, DomainError, DomainResult, PaymentService,
    PromotionService, StudentService,
};
use crate::storage::json::JsonConnection;

/// Application state: one instance of each domain service, all sharing the
/// same storage connection.
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub challans: ChallanService,
    pub payments: PaymentService,
    pub promotions: PromotionService,
    pub batches: BatchService,
}

impl AppState {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            students: StudentService::new(connection.clone()),
            challans: ChallanService::new(connection.clone()),
            payments: PaymentService::new(connection.clone()),
            promotions: PromotionService::new(connection.clone()),
            batches: BatchService::new(connection),
        }
    }
}

/// The `/api` router. CORS and state are layered on by the caller.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/:id", get(get_student).put(update_student))
        .route("/students/:id/challans", post(generate_challan))
        .route(
            "/students/:id/challans/:challan_id/payments",
            post(record_payment),
        )
        .route("/challans/bulk-generate", post(bulk_generate_challans))
        .route("/payments/bulk-record", post(bulk_record_payments))
        .route("/students/promote", post(promote_students))
        .route("/families", get(list_families))
        .route("/batches", get(list_batches).post(create_batch))
        .route("/batches/:id", put(update_batch).delete(delete_batch))
}

fn domain_error_response(error: DomainError) -> Response {
    let status = match &error {
        DomainError::DuplicateChallan { .. }
        | DomainError::ChallanLimitExceeded { .. }
        | DomainError::RollNumberConflict { .. } => StatusCode::CONFLICT,
        DomainError::ChallanNotFound(_)
        | DomainError::StudentNotFound(_)
        | DomainError::BatchNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::StudentValidation(_)
        | DomainError::BatchValidation(_)
        | DomainError::InvalidMonthKey(_)
        | DomainError::InvalidDate(_) => StatusCode::BAD_REQUEST,
        DomainError::Storage(e) => {
            tracing::error!("Storage failure: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, error.to_string()).into_response()
}

fn parse_optional_date(value: Option<&str>) -> DomainResult<Option<chrono::NaiveDate>> {
    value.map(calendar::parse_iso_date).transpose()
}

fn parse_student_status(value: &str) -> DomainResult<StudentStatus> {
    match value {
        "studying" => Ok(StudentStatus::Studying),
        "left" => Ok(StudentStatus::Left),
        "passed_out" => Ok(StudentStatus::PassedOut),
        other => Err(DomainError::StudentValidation(format!(
            "Unknown student status '{}'",
            other
        ))),
    }
}

fn parse_batch_status(value: &str) -> DomainResult<BatchStatus> {
    match value {
        "active" => Ok(BatchStatus::Active),
        "completed" => Ok(BatchStatus::Completed),
        other => Err(DomainError::BatchValidation(format!(
            "Unknown batch status '{}'",
            other
        ))),
    }
}

fn parse_challan_type(value: Option<&str>) -> DomainResult<ChallanType> {
    match value {
        None | Some("monthly") => Ok(ChallanType::Monthly),
        Some("admission") => Ok(ChallanType::Admission),
        Some(other) => Err(DomainError::StudentValidation(format!(
            "Unknown challan type '{}'",
            other
        ))),
    }
}

async fn list_students(State(state): State<AppState>) -> Response {
    info!("GET /api/students");
    match state.students.list_students() {
        Ok(students) => (StatusCode::OK, Json(students)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Response {
    info!("POST /api/students - name: {}", request.name);
    let command = CreateStudentCommand {
        name: request.name,
        father_name: request.father_name,
        class_name: request.class_name,
        section: request.section,
        roll_number: request.roll_number,
        academic_year: request.academic_year,
        monthly_fees: request.monthly_fees,
        admission_fees: request.admission_fees,
        total_fees: request.total_fees,
        family_id: request.family_id,
    };
    match state.students.create_student(command) {
        Ok(student) => (StatusCode::CREATED, Json(student)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn get_student(State(state): State<AppState>, Path(student_id): Path<String>) -> Response {
    info!("GET /api/students/{}", student_id);
    match state.students.get_student(&student_id) {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(request): Json<UpdateStudentRequest>,
) -> Response {
    info!("PUT /api/students/{}", student_id);
    let status = match request.status.as_deref().map(parse_student_status).transpose() {
        Ok(status) => status,
        Err(e) => return domain_error_response(e),
    };
    let command = UpdateStudentCommand {
        student_id,
        name: request.name,
        father_name: request.father_name,
        class_name: request.class_name,
        section: request.section,
        roll_number: request.roll_number,
        academic_year: request.academic_year,
        status,
        monthly_fees: request.monthly_fees,
        admission_fees: request.admission_fees,
        total_fees: request.total_fees,
        family_id: request.family_id,
    };
    match state.students.update_student(command) {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn generate_challan(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(request): Json<GenerateChallanRequest>,
) -> Response {
    info!(
        "POST /api/students/{}/challans - month: {}",
        student_id, request.month
    );
    let due_date = match parse_optional_date(request.due_date.as_deref()) {
        Ok(date) => date,
        Err(e) => return domain_error_response(e),
    };
    let challan_type = match parse_challan_type(request.challan_type.as_deref()) {
        Ok(t) => t,
        Err(e) => return domain_error_response(e),
    };
    let command = GenerateChallanCommand {
        student_id,
        month: request.month,
        amount: request.amount,
        due_date,
        challan_type,
        description: request.description,
    };
    match state.challans.generate_challan(command) {
        Ok(student) => (StatusCode::CREATED, Json(student)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn record_payment(
    State(state): State<AppState>,
    Path((student_id, challan_id)): Path<(String, String)>,
    Json(request): Json<RecordPaymentRequest>,
) -> Response {
    info!(
        "POST /api/students/{}/challans/{}/payments",
        student_id, challan_id
    );
    let payment_date = match parse_optional_date(request.payment_date.as_deref()) {
        Ok(date) => date,
        Err(e) => return domain_error_response(e),
    };
    let command = RecordPaymentCommand {
        student_id,
        challan_id,
        payment_method: request.payment_method,
        payment_date,
        discount_amount: request.discount_amount,
        discount_reason: request.discount_reason,
        actual_amount_paid: request.actual_amount_paid,
    };
    match state.payments.record_payment(command) {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn bulk_generate_challans(
    State(state): State<AppState>,
    Json(request): Json<BulkGenerateChallansRequest>,
) -> Response {
    info!(
        "POST /api/challans/bulk-generate - {} students",
        request.student_ids.len()
    );
    let due_date = match parse_optional_date(request.due_date.as_deref()) {
        Ok(date) => date,
        Err(e) => return domain_error_response(e),
    };
    let command = BulkGenerateChallansCommand {
        student_ids: request.student_ids,
        month: request.month,
        amount: request.amount,
        due_date,
        description: request.description,
    };
    match state.challans.bulk_generate(command) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn bulk_record_payments(
    State(state): State<AppState>,
    Json(request): Json<BulkRecordPaymentsRequest>,
) -> Response {
    info!(
        "POST /api/payments/bulk-record - {} items",
        request.payments.len()
    );
    let mut payments = Vec::with_capacity(request.payments.len());
    for item in request.payments {
        let payment_date = match parse_optional_date(item.payment_date.as_deref()) {
            Ok(date) => date,
            Err(e) => return domain_error_response(e),
        };
        payments.push(BulkPaymentItem {
            student_id: item.student_id,
            challan_id: item.challan_id,
            payment_method: item.payment_method,
            payment_date,
        });
    }
    match state
        .payments
        .bulk_record_payments(BulkRecordPaymentsCommand { payments })
    {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn promote_students(
    State(state): State<AppState>,
    Json(request): Json<PromoteStudentsRequest>,
) -> Response {
    info!(
        "POST /api/students/promote - {} students into {}",
        request.student_ids.len(),
        request.target_academic_year
    );
    let command = PromoteStudentsCommand {
        student_ids: request.student_ids,
        target_academic_year: request.target_academic_year,
    };
    match state.promotions.promote_students(command) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn list_families(State(state): State<AppState>) -> Response {
    info!("GET /api/families");
    match state.students.family_groups() {
        Ok(groups) => (StatusCode::OK, Json(groups)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn list_batches(State(state): State<AppState>) -> Response {
    info!("GET /api/batches");
    match state.batches.list_batches() {
        Ok(batches) => (StatusCode::OK, Json(batches)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn create_batch(
    State(state): State<AppState>,
    Json(request): Json<CreateBatchRequest>,
) -> Response {
    info!("POST /api/batches - name: {}", request.name);
    let (start_date, end_date) = match (
        calendar::parse_iso_date(&request.start_date),
        calendar::parse_iso_date(&request.end_date),
    ) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => return domain_error_response(e),
    };
    let command = CreateBatchCommand {
        name: request.name,
        start_date,
        end_date,
    };
    match state.batches.create_batch(command) {
        Ok(batch) => (StatusCode::CREATED, Json(batch)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn update_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
    Json(request): Json<UpdateBatchRequest>,
) -> Response {
    info!("PUT /api/batches/{}", batch_id);
    let start_date = match parse_optional_date(request.start_date.as_deref()) {
        Ok(date) => date,
        Err(e) => return domain_error_response(e),
    };
    let end_date = match parse_optional_date(request.end_date.as_deref()) {
        Ok(date) => date,
        Err(e) => return domain_error_response(e),
    };
    let status = match request.status.as_deref().map(parse_batch_status).transpose() {
        Ok(status) => status,
        Err(e) => return domain_error_response(e),
    };
    let command = UpdateBatchCommand {
        batch_id,
        name: request.name,
        start_date,
        end_date,
        status,
    };
    match state.batches.update_batch(command) {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn delete_batch(State(state): State<AppState>, Path(batch_id): Path<String>) -> Response {
    info!("DELETE /api/batches/{}", batch_id);
    match state.batches.delete_batch(&batch_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
