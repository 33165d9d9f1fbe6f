//! Value types shared across the academic modules: school level, weekday
//! and timetable block. Each maps to a Postgres enum of the same name.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "level", rename_all = "lowercase")]
pub enum Level {
    Level1,
    Level2,
    Level3,
    Level4,
}

impl Level {
    /// The level a student moves to at promotion time, if any.
    pub fn next(&self) -> Option<Level> {
        match self {
            Level::Level1 => Some(Level::Level2),
            Level::Level2 => Some(Level::Level3),
            Level::Level3 => Some(Level::Level4),
            Level::Level4 => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "day", rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// Timetable slot within a school day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "block", rename_all = "lowercase")]
pub enum Block {
    Block1,
    Block2,
    Block3,
    Block4,
    Block5,
    Block6,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_promotion_chain() {
        assert_eq!(Level::Level1.next(), Some(Level::Level2));
        assert_eq!(Level::Level2.next(), Some(Level::Level3));
        assert_eq!(Level::Level3.next(), Some(Level::Level4));
        assert_eq!(Level::Level4.next(), None);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Level::Level1).unwrap(),
            "\"level1\""
        );
        assert_eq!(serde_json::to_string(&Day::Monday).unwrap(), "\"monday\"");
        assert_eq!(
            serde_json::to_string(&Block::Block3).unwrap(),
            "\"block3\""
        );
    }
}
