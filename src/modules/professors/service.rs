use sqlx::PgPool;
use tracing::instrument;

use crate::modules::accounts::model::{AccountRole, AccountSummary, CredentialRecord};
use crate::modules::accounts::service::normalize_email;
use crate::modules::subjects::model::Subject;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateProfessorDto, Professor};

pub struct ProfessorService;

impl ProfessorService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateProfessorDto) -> Result<AccountSummary, AppError> {
        let email = normalize_email(&dto.email);
        let password_hash = hash_password(&dto.password)?;

        let record = sqlx::query_as::<_, CredentialRecord>(
            "INSERT INTO professors (name, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING id, name, email, password_hash, access_token, \
                 access_token_expires_at, refresh_token, refresh_token_expires_at, \
                 recovery_code, recovery_code_expires_at, revision",
        )
        .bind(&dto.name)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Professor with email {} already exists",
                        email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(AccountSummary::from_record(&record, AccountRole::Professor))
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<Professor>, AppError> {
        sqlx::query_as::<_, Professor>(
            "SELECT id, name, email, created_at, updated_at FROM professors ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    /// Subjects taught by a professor.
    #[instrument(skip(db))]
    pub async fn taught_subjects(db: &PgPool, professor_id: i64) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>(
            "SELECT id, name, level, day, block, professor_id \
             FROM subjects WHERE professor_id = $1 ORDER BY day, block",
        )
        .bind(professor_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }
}
