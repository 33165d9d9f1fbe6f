use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the Bearer access token and exposes its claims.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The numeric account id carried in the token subject.
    pub fn account_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid account id in token")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config, Utc::now())?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_parses_numeric_subject() {
        let user = AuthUser(Claims {
            sub: "42".to_string(),
            email: "test@example.com".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        });

        assert_eq!(user.account_id().unwrap(), 42);
        assert_eq!(user.email(), "test@example.com");
    }

    #[test]
    fn test_account_id_rejects_non_numeric_subject() {
        let user = AuthUser(Claims {
            sub: "not-a-number".to_string(),
            email: "test@example.com".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        });

        assert!(user.account_id().is_err());
    }
}
