use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::accounts::model::{
    AccountRole, AccountSummary, MessageResponse, ResetPasswordDto, UpdateAccountDto,
    VerifyRecoveryDto,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateStudentDto, Student};
use super::service::StudentService;

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student registered", body = AccountSummary),
        (status = 400, description = "Email already exists"),
        (status = 404, description = "Parent not found"),
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<AccountSummary>), AppError> {
    let summary = StudentService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// List students
#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "All students", body = [Student])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::find_all(&state.db).await?;
    Ok(Json(students))
}

/// The authenticated student's account summary
#[utoipa::path(
    get,
    path = "/api/students/me",
    responses(
        (status = 200, description = "Current student", body = AccountSummary),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth))]
pub async fn get_current_student(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state
        .accounts(AccountRole::Student)
        .find_current(&auth.0.sub)
        .await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Student,
    )))
}

/// Update a student's name, email or password
#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    request_body = UpdateAccountDto,
    responses(
        (status = 200, description = "Student updated", body = AccountSummary),
        (status = 404, description = "Student not found"),
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAccountDto>,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state.accounts(AccountRole::Student).update(id, dto).await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Student,
    )))
}

/// Remove a student
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    responses(
        (status = 200, description = "Removed student's last-known state", body = AccountSummary),
        (status = 404, description = "Student not found"),
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state.accounts(AccountRole::Student).remove(id).await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Student,
    )))
}

/// Start password recovery for a student
#[utoipa::path(
    patch,
    path = "/api/students/initial-password-recovery/{email}",
    responses(
        (status = 200, description = "Recovery email sent", body = MessageResponse),
        (status = 404, description = "Student not found"),
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn initiate_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Student)
        .initiate_password_recovery(&email)
        .await?;
    Ok(Json(MessageResponse {
        message: "Recovery email sent".to_string(),
    }))
}

/// Check a recovery code before resetting
#[utoipa::path(
    patch,
    path = "/api/students/verify-password-recovery/{email}",
    request_body = VerifyRecoveryDto,
    responses(
        (status = 200, description = "Code verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired recovery code"),
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn verify_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ValidatedJson(dto): ValidatedJson<VerifyRecoveryDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Student)
        .verify_recovery_code(&email, &dto.code)
        .await?;
    Ok(Json(MessageResponse {
        message: "Code verified, proceed to reset password".to_string(),
    }))
}

/// Reset the password with a valid recovery code
#[utoipa::path(
    patch,
    path = "/api/students/reset-password-recovery/{email}",
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Invalid or expired recovery code"),
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Student)
        .reset_password(&email, &dto.code, &dto.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
