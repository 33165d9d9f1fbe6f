use sqlx::PgPool;
use tracing::instrument;

use crate::modules::shared::Level;
use crate::utils::errors::AppError;

use super::model::{CreateSubjectDto, Subject, SubjectStudent, UpdateSubjectDto};

const SUBJECT_COLUMNS: &str = "id, name, level, day, block, professor_id";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let professor: Option<i64> =
            sqlx::query_scalar("SELECT id FROM professors WHERE id = $1")
                .bind(dto.professor_id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if professor.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Professor with id {} not found",
                dto.professor_id
            )));
        }

        sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (name, level, day, block, professor_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(dto.level)
        .bind(dto.day)
        .bind(dto.block)
        .bind(dto.professor_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects ORDER BY level, day, block"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn find_one(db: &PgPool, id: i64) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject with id {} not found", id)))
    }

    /// Students at the subject's level, i.e. its class roster.
    #[instrument(skip(db))]
    pub async fn roster(db: &PgPool, id: i64) -> Result<Vec<SubjectStudent>, AppError> {
        let subject = Self::find_one(db, id).await?;

        sqlx::query_as::<_, SubjectStudent>(
            "SELECT id, name FROM students WHERE level = $1 ORDER BY name",
        )
        .bind(subject.level)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    /// Subjects available to a student, selected by the student's level.
    #[instrument(skip(db))]
    pub async fn for_student(db: &PgPool, student_id: i64) -> Result<Vec<Subject>, AppError> {
        let level: Option<Level> =
            sqlx::query_scalar("SELECT level FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        let Some(level) = level else {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Student with id {} not found",
                student_id
            )));
        };

        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE level = $1 ORDER BY day, block"
        ))
        .bind(level)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i64, dto: UpdateSubjectDto) -> Result<Subject, AppError> {
        let existing = Self::find_one(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let level = dto.level.unwrap_or(existing.level);
        let day = dto.day.unwrap_or(existing.day);
        let block = dto.block.unwrap_or(existing.block);

        sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects SET name = $1, level = $2, day = $3, block = $4 \
             WHERE id = $5 RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(&name)
        .bind(level)
        .bind(day)
        .bind(block)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn remove(db: &PgPool, id: i64) -> Result<Subject, AppError> {
        let subject = Self::find_one(db, id).await?;

        sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(subject)
    }
}
