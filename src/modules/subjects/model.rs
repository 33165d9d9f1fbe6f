use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::shared::{Block, Day, Level};

/// A taught subject with its weekly timetable slot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub level: Level,
    pub day: Day,
    pub block: Block,
    pub professor_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1))]
    pub name: String,
    pub level: Level,
    pub day: Day,
    pub block: Block,
    pub professor_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub level: Option<Level>,
    pub day: Option<Day>,
    pub block: Option<Block>,
}

/// Roster entry: a student enrolled at the subject's level.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SubjectStudent {
    pub id: i64,
    pub name: String,
}
