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

use super::model::{CreateParentDto, LinkedStudent, Parent};
use super::service::ParentService;

/// Register a new parent
#[utoipa::path(
    post,
    path = "/api/parents",
    request_body = CreateParentDto,
    responses(
        (status = 201, description = "Parent registered", body = AccountSummary),
        (status = 400, description = "Email already exists"),
    ),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn create_parent(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateParentDto>,
) -> Result<(StatusCode, Json<AccountSummary>), AppError> {
    let summary = ParentService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// List parents
#[utoipa::path(
    get,
    path = "/api/parents",
    responses((status = 200, description = "All parents", body = [Parent])),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn get_parents(State(state): State<AppState>) -> Result<Json<Vec<Parent>>, AppError> {
    let parents = ParentService::find_all(&state.db).await?;
    Ok(Json(parents))
}

/// The authenticated parent's account summary
#[utoipa::path(
    get,
    path = "/api/parents/me",
    responses(
        (status = 200, description = "Current parent", body = AccountSummary),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state, auth))]
pub async fn get_current_parent(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state
        .accounts(AccountRole::Parent)
        .find_current(&auth.0.sub)
        .await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Parent,
    )))
}

/// Students linked to the authenticated parent
#[utoipa::path(
    get,
    path = "/api/parents/me/students",
    responses(
        (status = 200, description = "Linked students", body = [LinkedStudent]),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state, auth))]
pub async fn get_linked_students(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<LinkedStudent>>, AppError> {
    let students = ParentService::linked_students(&state.db, auth.account_id()?).await?;
    Ok(Json(students))
}

/// Update a parent's name, email or password
#[utoipa::path(
    patch,
    path = "/api/parents/{id}",
    request_body = UpdateAccountDto,
    responses(
        (status = 200, description = "Parent updated", body = AccountSummary),
        (status = 404, description = "Parent not found"),
    ),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn update_parent(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAccountDto>,
) -> Result<Json<AccountSummary>, AppError> {
    let record = state.accounts(AccountRole::Parent).update(id, dto).await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Parent,
    )))
}

/// Remove a parent without dependent students
#[utoipa::path(
    delete,
    path = "/api/parents/{id}",
    responses(
        (status = 200, description = "Removed parent's last-known state", body = AccountSummary),
        (status = 404, description = "Parent not found"),
        (status = 409, description = "Parent still has linked students"),
    ),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn delete_parent(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountSummary>, AppError> {
    ParentService::ensure_removable(&state.db, id).await?;
    let record = state.accounts(AccountRole::Parent).remove(id).await?;
    Ok(Json(AccountSummary::from_record(
        &record,
        AccountRole::Parent,
    )))
}

/// Start password recovery for a parent
#[utoipa::path(
    patch,
    path = "/api/parents/initial-password-recovery/{email}",
    responses(
        (status = 200, description = "Recovery email sent", body = MessageResponse),
        (status = 404, description = "Parent not found"),
    ),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn initiate_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Parent)
        .initiate_password_recovery(&email)
        .await?;
    Ok(Json(MessageResponse {
        message: "Recovery email sent".to_string(),
    }))
}

/// Check a recovery code before resetting
#[utoipa::path(
    patch,
    path = "/api/parents/verify-password-recovery/{email}",
    request_body = VerifyRecoveryDto,
    responses(
        (status = 200, description = "Code verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired recovery code"),
    ),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn verify_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ValidatedJson(dto): ValidatedJson<VerifyRecoveryDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Parent)
        .verify_recovery_code(&email, &dto.code)
        .await?;
    Ok(Json(MessageResponse {
        message: "Code verified, proceed to reset password".to_string(),
    }))
}

/// Reset the password with a valid recovery code
#[utoipa::path(
    patch,
    path = "/api/parents/reset-password-recovery/{email}",
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Invalid or expired recovery code"),
    ),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password_recovery(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts(AccountRole::Parent)
        .reset_password(&email, &dto.code, &dto.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
