use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::shared::Level;

/// A grade joined with the names it is reported under. Chilean scale:
/// 1.0 through 7.0.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GradeReport {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub grade: f64,
    pub level: Level,
    pub year: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGradeDto {
    pub student_id: i64,
    pub subject_id: i64,
    #[validate(range(min = 1.0, max = 7.0))]
    pub grade: f64,
    pub level: Level,
    #[validate(range(min = 2000, max = 3000))]
    pub year: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGradeDto {
    #[validate(range(min = 1.0, max = 7.0))]
    pub grade: Option<f64>,
    pub level: Option<Level>,
    #[validate(range(min = 2000, max = 3000))]
    pub year: Option<i32>,
}
