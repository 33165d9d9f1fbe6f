use sqlx::PgPool;
use tracing::instrument;

use crate::modules::accounts::model::{AccountRole, AccountSummary, CredentialRecord};
use crate::modules::accounts::service::normalize_email;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateParentDto, LinkedStudent, Parent};

pub struct ParentService;

impl ParentService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateParentDto) -> Result<AccountSummary, AppError> {
        let email = normalize_email(&dto.email);
        let password_hash = hash_password(&dto.password)?;

        let record = sqlx::query_as::<_, CredentialRecord>(
            "INSERT INTO parents (name, email, password_hash) \
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
                        "Parent with email {} already exists",
                        email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(AccountSummary::from_record(&record, AccountRole::Parent))
    }

    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> Result<Vec<Parent>, AppError> {
        sqlx::query_as::<_, Parent>(
            "SELECT id, name, email, created_at, updated_at FROM parents ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    /// Students linked to a parent account.
    #[instrument(skip(db))]
    pub async fn linked_students(db: &PgPool, parent_id: i64) -> Result<Vec<LinkedStudent>, AppError> {
        sqlx::query_as::<_, LinkedStudent>(
            "SELECT id, name, level FROM students WHERE parent_id = $1 ORDER BY name",
        )
        .bind(parent_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    /// Removal is blocked while any student record still references the
    /// parent. This is the one cross-entity invariant checked at removal.
    #[instrument(skip(db))]
    pub async fn ensure_removable(db: &PgPool, parent_id: i64) -> Result<(), AppError> {
        let dependents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE parent_id = $1")
                .bind(parent_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        if dependents > 0 {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Cannot remove parent with associated students"
            )));
        }

        Ok(())
    }
}
