use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::accounts::model::{
    AccountRole, AccountSummary, MessageResponse, ResetPasswordDto, UpdateAccountDto,
    VerifyRecoveryDto,
};
use crate::modules::subjects::model::Subject;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateProfessorDto, Professor};
use super::service::ProfessorService;

/// Register a new professor
#[utoipa::path(
    post,
    path = "/api/professors",
    request_body = CreateProfessorDto,
    responses(
        (status = 201, description = "Professor registered", body = AccountSummary),
        (status = 400, description = "Email already exists"),
    ),
    tag = "Professors"
)]
#[instrument(skip(state, dto))]
pub async fn create_professor(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProfessorDto>,
) -> Result<(StatusCode, Json<AccountSummary>), AppError> {
    let summary = ProfessorService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// List professors
#[utoipa::path(
    get,
    path = "/api/professors",
    responses((status = 200, description = "All professors", body = [Professor])),
    tag = "Professors"
)]
#[instrument(skip(state))]
pub async fn get_professors(
    State(state): State<AppState>,
) -> Result<Json<Vec<Professor>>, AppError> {
    let professors = ProfessorService::find_all(&state.db).await?;
    Ok(Json(professors))
}

/// The authenticated professor's account summary
#[utoipa::path(
    get,
    path = "/api/professors/me",
    responses(
        (status = 200, description = "Current professor", body = AccountSummary),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Professors"
)]
#[instrument(skip(state, auth))]
pub async fn get_current_professor(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state
        .accounts(AccountRole::Professor)
        .find_current(&auth.0.sub)
        .await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Professor,
    )))
}

/// Subjects taught by the authenticated professor
#[utoipa::path(
    get,
    path = "/api/professors/me/subjects",
    responses(
        (status = 200, description = "Taught subjects", body = [Subject]),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Professors"
)]
#[instrument(skip(state, auth))]
pub async fn get_taught_subjects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = ProfessorService::taught_subjects(&state.db, auth.account_id()?).await?;
    Ok(Json(subjects))
}

/// Update a professor's name, email or password
#[utoipa::path(
    patch,
    path = "/api/professors/{id}",
    request_body = UpdateAccountDto,
    responses(
        (status = 200, description = "Professor updated", body = AccountSummary),
        (status = 404, description = "Professor not found"),
    ),
    tag = "Professors"
)]
#[instrument(skip(state, dto))]
pub async fn update_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAccountDto>,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state
        .accounts(AccountRole::Professor)
        .update(id, dto)
        .await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Professor,
    )))
}

/// Remove a professor
#[utoipa::path(
    delete,
    path = "/api/professors/{id}",
    responses(
        (status = 200, description = "Removed professor's last-known state", body = AccountSummary),
        (status = 404, description = "Professor not found"),
    ),
    tag = "Professors"
)]
#[instrument(skip(state))]
pub async fn delete_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state.accounts(AccountRole::Professor).remove(id).await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Professor,
    )))
}

/// Start password recovery for a professor
#[utoipa::path(
    patch,
    path = "/api/professors/initial-password-recovery/{email}",
    responses(
        (status = 200, description = "Recovery email sent", body = MessageResponse),
        (status = 404, description = "Professor not found"),
    ),
    tag = "Professors"
)]
#[instrument(skip(state))]
pub async fn initiate_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Professor)
        .initiate_password_recovery(&email)
        .await?;
    Ok(Json(MessageResponse {
        message: "Recovery email sent".to_string(),
    }))
}

/// Check a recovery code before resetting
#[utoipa::path(
    patch,
    path = "/api/professors/verify-password-recovery/{email}",
    request_body = VerifyRecoveryDto,
    responses(
        (status = 200, description = "Code verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired recovery code"),
    ),
    tag = "Professors"
)]
#[instrument(skip(state, dto))]
pub async fn verify_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ValidatedJson(dto): ValidatedJson<VerifyRecoveryDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Professor)
        .verify_recovery_code(&email, &dto.code)
        .await?;
    Ok(Json(MessageResponse {
        message: "Code verified, proceed to reset password".to_string(),
    }))
}

/// Reset the password with a valid recovery code
#[utoipa::path(
    patch,
    path = "/api/professors/reset-password-recovery/{email}",
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Invalid or expired recovery code"),
    ),
    tag = "Professors"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Professor)
        .reset_password(&email, &dto.code, &dto.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
