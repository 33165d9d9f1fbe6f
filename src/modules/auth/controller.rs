use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use crate::modules::accounts::model::{AccountRole, TokenPair};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, RefreshRequest};

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn parse_role(tag: &str) -> Result<AccountRole, AppError> {
    tag.parse()
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Unrecognized role: {}", tag)))
}

/// Login with email, password and role, receiving a token pair
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenPair),
        (status = 400, description = "Unrecognized role tag", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let role = parse_role(&dto.role)?;
    let pair = state.accounts(role).login(&dto.email, &dto.password).await?;
    Ok(Json(pair))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens rotated", body = TokenPair),
        (status = 400, description = "Unrecognized role tag", body = ErrorResponse),
        (status = 401, description = "Invalid refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let role = parse_role(&dto.role)?;
    let pair = state.accounts(role).refresh(&dto.refresh_token).await?;
    Ok(Json(pair))
}
