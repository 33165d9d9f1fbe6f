use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::shared::Level;

/// Sanitized student row. Credential columns (password hash, tokens,
/// recovery state) are deliberately not part of this projection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub level: Level,
    pub parent_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Every student is linked to an existing parent account.
    pub parent_id: i64,
    /// Defaults to the entry level when omitted.
    pub level: Option<Level>,
}
