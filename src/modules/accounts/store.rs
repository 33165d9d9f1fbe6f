use sqlx::PgPool;

use crate::utils::errors::AppError;

use super::model::{AccountRole, CredentialRecord};

/// Narrow persistence seam for credential records. Creation and any
/// role-specific reads (parent/student links, taught subjects) stay in the
/// role modules; the account service only needs these four operations.
pub trait CredentialStore: Send + Sync {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<CredentialRecord>, AppError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<CredentialRecord>, AppError>> + Send;

    /// Persists the record's mutable fields. The update is guarded by the
    /// record's `revision`: a concurrent writer that got there first makes
    /// this save fail with 409 instead of silently losing the race.
    fn save(
        &self,
        record: &CredentialRecord,
    ) -> impl Future<Output = Result<CredentialRecord, AppError>> + Send;

    fn remove(
        &self,
        record: &CredentialRecord,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

const CREDENTIAL_COLUMNS: &str = "id, name, email, password_hash, \
     access_token, access_token_expires_at, refresh_token, \
     refresh_token_expires_at, recovery_code, recovery_code_expires_at, \
     revision";

/// Postgres-backed store. One instance per role; the role picks the table,
/// everything else is shared.
#[derive(Clone, Debug)]
pub struct PgCredentialStore {
    pool: PgPool,
    role: AccountRole,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool, role: AccountRole) -> Self {
        Self { pool, role }
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, AppError> {
        let sql = format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM {} WHERE email = $1",
            self.role.table()
        );

        sqlx::query_as::<_, CredentialRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CredentialRecord>, AppError> {
        let sql = format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM {} WHERE id = $1",
            self.role.table()
        );

        sqlx::query_as::<_, CredentialRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    async fn save(&self, record: &CredentialRecord) -> Result<CredentialRecord, AppError> {
        let sql = format!(
            "UPDATE {} SET \
                 name = $1, email = $2, password_hash = $3, \
                 access_token = $4, access_token_expires_at = $5, \
                 refresh_token = $6, refresh_token_expires_at = $7, \
                 recovery_code = $8, recovery_code_expires_at = $9, \
                 revision = revision + 1, updated_at = now() \
             WHERE id = $10 AND revision = $11 \
             RETURNING {CREDENTIAL_COLUMNS}",
            self.role.table()
        );

        sqlx::query_as::<_, CredentialRecord>(&sql)
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.password_hash)
            .bind(&record.access_token)
            .bind(record.access_token_expires_at)
            .bind(&record.refresh_token)
            .bind(record.refresh_token_expires_at)
            .bind(&record.recovery_code)
            .bind(record.recovery_code_expires_at)
            .bind(record.id)
            .bind(record.revision)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| {
                AppError::conflict(anyhow::anyhow!(
                    "{} record was modified concurrently",
                    self.role
                ))
            })
    }

    async fn remove(&self, record: &CredentialRecord) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.role.table());

        let result = sqlx::query(&sql)
            .bind(record.id)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "{} not found",
                self.role
            )));
        }

        Ok(())
    }
}
