use sqlx::PgPool;
use tracing::instrument;

use crate::modules::accounts::model::{AccountRole, AccountSummary, CredentialRecord};
use crate::modules::accounts::service::normalize_email;
use crate::modules::shared::Level;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateStudentDto, Student};

pub struct StudentService;

impl StudentService {
    /// Registers a student under an existing parent. Tokens start out null;
    /// the first login issues them.
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateStudentDto) -> Result<AccountSummary, AppError> {
        let parent: Option<i64> = sqlx::query_scalar("SELECT id FROM parents WHERE id = $1")
            .bind(dto.parent_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if parent.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Parent not found for student"
            )));
        }

        let email = normalize_email(&dto.email);
        let password_hash = hash_password(&dto.password)?;
        let level = dto.level.unwrap_or(Level::Level1);

        let record = sqlx::query_as::<_, CredentialRecord>(
            "INSERT INTO students (name, email, password_hash, level, parent_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, email, password_hash, access_token, \
                 access_token_expires_at, refresh_token, refresh_token_expires_at, \
                 recovery_code, recovery_code_expires_at, revision",
        )
        .bind(&dto.name)
        .bind(&email)
        .bind(&password_hash)
        .bind(level)
        .bind(dto.parent_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Student with email {} already exists",
                        email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(AccountSummary::from_record(&record, AccountRole::Student))
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<Student>, AppError> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, email, level, parent_id, created_at, updated_at \
             FROM students ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }
}
