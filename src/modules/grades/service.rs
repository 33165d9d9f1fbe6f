use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{CreateGradeDto, GradeReport, UpdateGradeDto};

const REPORT_QUERY: &str = "SELECT g.id, g.student_id, st.name AS student_name, \
         g.subject_id, su.name AS subject_name, g.grade, g.level, g.year \
     FROM grades g \
     JOIN students st ON st.id = g.student_id \
     JOIN subjects su ON su.id = g.subject_id";

pub struct GradeService;

impl GradeService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateGradeDto) -> Result<GradeReport, AppError> {
        let student: Option<i64> = sqlx::query_scalar("SELECT id FROM students WHERE id = $1")
            .bind(dto.student_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;
        if student.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Student with id {} not found",
                dto.student_id
            )));
        }

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

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO grades (student_id, subject_id, grade, level, year) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(dto.student_id)
        .bind(dto.subject_id)
        .bind(dto.grade)
        .bind(dto.level)
        .bind(dto.year)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Self::find_one(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<GradeReport>, AppError> {
        sqlx::query_as::<_, GradeReport>(&format!("{REPORT_QUERY} ORDER BY g.id"))
            .fetch_all(db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn find_one(db: &PgPool, id: i64) -> Result<GradeReport, AppError> {
        sqlx::query_as::<_, GradeReport>(&format!("{REPORT_QUERY} WHERE g.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade with id {} not found", id)))
    }

    #[instrument(skip(db))]
    pub async fn student_grades(db: &PgPool, student_id: i64) -> Result<Vec<GradeReport>, AppError> {
        let student: Option<i64> = sqlx::query_scalar("SELECT id FROM students WHERE id = $1")
            .bind(student_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;
        if student.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Student with id {} not found",
                student_id
            )));
        }

        sqlx::query_as::<_, GradeReport>(&format!(
            "{REPORT_QUERY} WHERE g.student_id = $1 ORDER BY g.year, g.id"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i64, dto: UpdateGradeDto) -> Result<GradeReport, AppError> {
        let existing = Self::find_one(db, id).await?;

        let grade = dto.grade.unwrap_or(existing.grade);
        let level = dto.level.unwrap_or(existing.level);
        let year = dto.year.unwrap_or(existing.year);

        sqlx::query("UPDATE grades SET grade = $1, level = $2, year = $3 WHERE id = $4")
            .bind(grade)
            .bind(level)
            .bind(year)
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Self::find_one(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn remove(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Grade with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
