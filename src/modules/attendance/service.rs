use std::collections::HashSet;

use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{AttendanceSession, CreateAttendanceDto, UpdateAttendanceDto};

const SESSION_COLUMNS: &str = "id, subject_id, date, level, student_ids";

/// Share of filled roster slots across a subject's sessions: present
/// entries over (distinct students seen × sessions held). 0 when no
/// session has been recorded.
pub fn subject_attendance_percentage(sessions: &[AttendanceSession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }

    let total_present: usize = sessions.iter().map(|s| s.student_ids.len()).sum();
    let distinct_students: HashSet<i64> = sessions
        .iter()
        .flat_map(|s| s.student_ids.iter().copied())
        .collect();

    let possible = distinct_students.len() * sessions.len();
    if possible == 0 {
        return 0.0;
    }

    (total_present as f64 / possible as f64) * 100.0
}

/// Share of a subject's sessions in which one student appears.
pub fn student_attendance_percentage(sessions: &[AttendanceSession], student_id: i64) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }

    let attended = sessions
        .iter()
        .filter(|s| s.student_ids.contains(&student_id))
        .count();

    (attended as f64 / sessions.len() as f64) * 100.0
}

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateAttendanceDto,
    ) -> Result<AttendanceSession, AppError> {
        let subject: Option<i64> = sqlx::query_scalar("SELECT id FROM subjects WHERE id = $1")
            .bind(dto.subject_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if subject.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Subject with id {} not found",
                dto.subject_id
            )));
        }

        sqlx::query_as::<_, AttendanceSession>(&format!(
            "INSERT INTO attendance (subject_id, date, level, student_ids) \
             VALUES ($1, $2, $3, $4) RETURNING {SESSION_COLUMNS}"
        ))
        .bind(dto.subject_id)
        .bind(dto.date)
        .bind(dto.level)
        .bind(&dto.student_ids)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<AttendanceSession>, AppError> {
        sqlx::query_as::<_, AttendanceSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM attendance ORDER BY date"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn find_one(db: &PgPool, id: i64) -> Result<AttendanceSession, AppError> {
        sqlx::query_as::<_, AttendanceSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM attendance WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("Attendance record with id {} not found", id))
        })
    }

    /// Sessions in which a student appears.
    #[instrument(skip(db))]
    pub async fn for_student(
        db: &PgPool,
        student_id: i64,
    ) -> Result<Vec<AttendanceSession>, AppError> {
        let sessions = sqlx::query_as::<_, AttendanceSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM attendance \
             WHERE $1 = ANY(student_ids) ORDER BY date"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        if sessions.is_empty() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "No attendance records found for student with id {}",
                student_id
            )));
        }

        Ok(sessions)
    }

    #[instrument(skip(db))]
    pub async fn subject_percentage(db: &PgPool, subject_id: i64) -> Result<f64, AppError> {
        let sessions = Self::subject_sessions(db, subject_id).await?;
        Ok(subject_attendance_percentage(&sessions))
    }

    #[instrument(skip(db))]
    pub async fn student_subject_percentage(
        db: &PgPool,
        subject_id: i64,
        student_id: i64,
    ) -> Result<f64, AppError> {
        let sessions = Self::subject_sessions(db, subject_id).await?;
        Ok(student_attendance_percentage(&sessions, student_id))
    }

    async fn subject_sessions(
        db: &PgPool,
        subject_id: i64,
    ) -> Result<Vec<AttendanceSession>, AppError> {
        sqlx::query_as::<_, AttendanceSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM attendance WHERE subject_id = $1 ORDER BY date"
        ))
        .bind(subject_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: i64,
        dto: UpdateAttendanceDto,
    ) -> Result<AttendanceSession, AppError> {
        let existing = Self::find_one(db, id).await?;

        let date = dto.date.unwrap_or(existing.date);
        let level = dto.level.unwrap_or(existing.level);
        let student_ids = dto.student_ids.unwrap_or(existing.student_ids);

        sqlx::query_as::<_, AttendanceSession>(&format!(
            "UPDATE attendance SET date = $1, level = $2, student_ids = $3 \
             WHERE id = $4 RETURNING {SESSION_COLUMNS}"
        ))
        .bind(date)
        .bind(level)
        .bind(&student_ids)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn remove(db: &PgPool, id: i64) -> Result<AttendanceSession, AppError> {
        let session = Self::find_one(db, id).await?;

        sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::shared::Level;
    use chrono::NaiveDate;

    fn session(id: i64, student_ids: Vec<i64>) -> AttendanceSession {
        AttendanceSession {
            id,
            subject_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            level: Level::Level1,
            student_ids,
        }
    }

    #[test]
    fn test_subject_percentage_no_sessions() {
        assert_eq!(subject_attendance_percentage(&[]), 0.0);
    }

    #[test]
    fn test_subject_percentage_full_house() {
        let sessions = vec![session(1, vec![1, 2]), session(2, vec![1, 2])];
        assert_eq!(subject_attendance_percentage(&sessions), 100.0);
    }

    #[test]
    fn test_subject_percentage_partial() {
        // Two students ever seen, two sessions: 3 of 4 slots filled.
        let sessions = vec![session(1, vec![1, 2]), session(2, vec![1])];
        assert_eq!(subject_attendance_percentage(&sessions), 75.0);
    }

    #[test]
    fn test_subject_percentage_all_rosters_empty() {
        let sessions = vec![session(1, vec![]), session(2, vec![])];
        assert_eq!(subject_attendance_percentage(&sessions), 0.0);
    }

    #[test]
    fn test_student_percentage() {
        let sessions = vec![
            session(1, vec![1, 2]),
            session(2, vec![2]),
            session(3, vec![1, 2]),
            session(4, vec![2]),
        ];
        assert_eq!(student_attendance_percentage(&sessions, 1), 50.0);
        assert_eq!(student_attendance_percentage(&sessions, 2), 100.0);
        assert_eq!(student_attendance_percentage(&sessions, 99), 0.0);
    }

    #[test]
    fn test_student_percentage_no_sessions() {
        assert_eq!(student_attendance_percentage(&[], 1), 0.0);
    }
}
