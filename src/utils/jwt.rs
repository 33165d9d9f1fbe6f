use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::utils::errors::AppError;

/// Issues a short-lived access token carrying `{sub, email}`.
pub fn create_access_token(
    account_id: i64,
    email: &str,
    jwt_config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    sign_token(account_id, email, jwt_config.access_token_expiry, jwt_config, now)
}

/// Issues a long-lived refresh token with the same payload shape. Refresh
/// tokens are told apart from access tokens only by the equality check
/// against the stored `refresh_token` column, not by a claim.
pub fn create_refresh_token(
    account_id: i64,
    email: &str,
    jwt_config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    sign_token(account_id, email, jwt_config.refresh_token_expiry, jwt_config, now)
}

fn sign_token(
    account_id: i64,
    email: &str,
    expiry_secs: i64,
    jwt_config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let iat = now.timestamp() as usize;
    let exp = iat + expiry_secs as usize;

    let claims = Claims {
        sub: account_id.to_string(),
        email: email.to_string(),
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry. Expiry is compared against the supplied
/// timestamp rather than the library's wall clock, so a simulated clock
/// covers the whole path. Any failure is surfaced uniformly as 401.
pub fn verify_token(
    token: &str,
    jwt_config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.validate_exp = false;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired token")))?;

    if claims.exp <= now.timestamp() as usize {
        return Err(AppError::unauthorized(anyhow::anyhow!(
            "Invalid or expired token"
        )));
    }

    Ok(claims)
}
