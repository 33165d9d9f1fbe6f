use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// JWT claims carried by both token classes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Role tag selecting the account table: student, parent or professor.
    #[validate(length(min = 1))]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[serde(alias = "refreshToken")]
    #[validate(length(min = 1))]
    pub refresh_token: String,
    #[validate(length(min = 1))]
    pub role: String,
}
