use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::shared::Level;

/// One taken-attendance session: which students of a level were present in
/// a subject on a date. The roster is kept as an id array, mirroring the
/// document shape the data was originally captured in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceSession {
    pub id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub level: Level,
    pub student_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAttendanceDto {
    pub subject_id: i64,
    pub date: NaiveDate,
    pub level: Level,
    #[serde(default)]
    pub student_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendanceDto {
    pub date: Option<NaiveDate>,
    pub level: Option<Level>,
    pub student_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendancePercentage {
    pub percentage: f64,
}
