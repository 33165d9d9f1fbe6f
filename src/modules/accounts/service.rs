use chrono::Duration;
use tracing::{info, instrument, warn};

use crate::config::jwt::JwtConfig;
use crate::utils::clock::Clock;
use crate::utils::email::RecoveryMailer;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token, verify_token};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::recovery::generate_recovery_code;

use super::model::{AccountRole, CredentialRecord, TokenPair, UpdateAccountDto};
use super::store::CredentialStore;

/// Recovery codes stay valid for one hour.
const RECOVERY_CODE_TTL_SECS: i64 = 3600;

/// Stored emails are lowercase; lookups normalize the same way so login and
/// recovery are case-insensitive on the address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Account service shared by all three roles.
///
/// One instance per role, parameterized by the credential store, the mail
/// collaborator, and the clock. Every role gets identical login, refresh,
/// recovery, update, and removal semantics from this one implementation.
pub struct AccountService<S, M, C> {
    store: S,
    mailer: M,
    clock: C,
    jwt_config: JwtConfig,
    role: AccountRole,
}

impl<S, M, C> AccountService<S, M, C>
where
    S: CredentialStore,
    M: RecoveryMailer,
    C: Clock,
{
    pub fn new(store: S, mailer: M, clock: C, jwt_config: JwtConfig, role: AccountRole) -> Self {
        Self {
            store,
            mailer,
            clock,
            jwt_config,
            role,
        }
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }

    /// Validates credentials and issues a fresh token pair, overwriting any
    /// previously stored session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let email = normalize_email(email);

        let Some(record) = self.store.find_by_email(&email).await? else {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        };

        if !verify_password(password, &record.password_hash)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let pair = self.issue_session(record).await?;
        info!(role = %self.role, "Login succeeded");
        Ok(pair)
    }

    /// Exchanges a refresh token for a new pair. Fails uniformly with 401
    /// when the token does not pass the three-way check.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let Some(record) = self.verify_refresh_token(refresh_token).await? else {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid refresh token"
            )));
        };

        self.issue_session(record).await
    }

    /// The three-way refresh check: the token must decode and be unexpired,
    /// it must equal the subject's currently stored refresh token, and the
    /// stored expiry must be in the future. Presenting a superseded token
    /// fails the equality leg, which is what enforces the single active
    /// session per account. Fails closed: any miss is `None`, never an
    /// error the caller could distinguish.
    pub async fn verify_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<CredentialRecord>, AppError> {
        let now = self.clock.now();

        let Ok(claims) = verify_token(refresh_token, &self.jwt_config, now) else {
            return Ok(None);
        };

        let Ok(id) = claims.sub.parse::<i64>() else {
            return Ok(None);
        };

        let Some(record) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };

        let matches_stored = record.refresh_token.as_deref() == Some(refresh_token);
        let unexpired = record
            .refresh_token_expires_at
            .is_some_and(|expires_at| expires_at > now);

        if matches_stored && unexpired {
            Ok(Some(record))
        } else {
            warn!(role = %self.role, account_id = id, "Refresh token mismatch or expired");
            Ok(None)
        }
    }

    /// Issues a new token pair and persists it with expiry timestamps
    /// recomputed from now, unconditionally replacing the previous pair.
    async fn issue_session(&self, mut record: CredentialRecord) -> Result<TokenPair, AppError> {
        let now = self.clock.now();

        let access_token = create_access_token(record.id, &record.email, &self.jwt_config, now)?;
        let refresh_token = create_refresh_token(record.id, &record.email, &self.jwt_config, now)?;

        record.access_token = Some(access_token.clone());
        record.access_token_expires_at =
            Some(now + Duration::seconds(self.jwt_config.access_token_expiry));
        record.refresh_token = Some(refresh_token.clone());
        record.refresh_token_expires_at =
            Some(now + Duration::seconds(self.jwt_config.refresh_token_expiry));

        self.store.save(&record).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Looks up the record behind a set of verified access-token claims.
    pub async fn find_current(&self, subject: &str) -> Result<CredentialRecord, AppError> {
        let id: i64 = subject
            .parse()
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid token subject")))?;

        self.require(id).await
    }

    async fn require(&self, id: i64) -> Result<CredentialRecord, AppError> {
        self.store.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("{} with id {} not found", self.role, id))
        })
    }

    /// Opens a recovery window: generates a single-use code, stamps a
    /// 1-hour expiry, persists both, and dispatches the code by email.
    /// A repeated call overwrites any previous window.
    #[instrument(skip(self))]
    pub async fn initiate_password_recovery(&self, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);

        let Some(mut record) = self.store.find_by_email(&email).await? else {
            return Err(AppError::not_found(anyhow::anyhow!(
                "{} not found",
                self.role
            )));
        };

        let code = generate_recovery_code();
        record.recovery_code = Some(code.clone());
        record.recovery_code_expires_at =
            Some(self.clock.now() + Duration::seconds(RECOVERY_CODE_TTL_SECS));

        let record = self.store.save(&record).await?;

        self.mailer.send_recovery_email(&record.email, &code).await?;
        info!(role = %self.role, account_id = record.id, "Recovery email sent");

        Ok(())
    }

    #[instrument(skip(self, code))]
    pub async fn verify_recovery_code(&self, email: &str, code: &str) -> Result<(), AppError> {
        self.find_open_recovery(email, code).await.map(|_| ())
    }

    /// Resets the password under the same matching rule as
    /// [`Self::verify_recovery_code`], then clears the recovery fields in
    /// the same save, which is what makes the code single-use.
    #[instrument(skip(self, code, new_password))]
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let mut record = self.find_open_recovery(email, code).await?;

        record.password_hash = hash_password(new_password)?;
        record.recovery_code = None;
        record.recovery_code_expires_at = None;

        self.store.save(&record).await?;
        info!(role = %self.role, account_id = record.id, "Password reset");

        Ok(())
    }

    /// The record matching email and code, provided the recovery window is
    /// still open. Misses of any kind collapse into one 400, so a caller
    /// cannot probe which part of the match failed.
    async fn find_open_recovery(
        &self,
        email: &str,
        code: &str,
    ) -> Result<CredentialRecord, AppError> {
        let email = normalize_email(email);

        if let Some(record) = self.store.find_by_email(&email).await? {
            let code_matches = record.recovery_code.as_deref() == Some(code);
            let unexpired = record
                .recovery_code_expires_at
                .is_some_and(|expires_at| expires_at > self.clock.now());

            if code_matches && unexpired {
                return Ok(record);
            }
        }

        Err(AppError::bad_request(anyhow::anyhow!(
            "Invalid or expired recovery code"
        )))
    }

    /// Applies a partial update. Present fields win; passwords are
    /// re-hashed and never stored raw.
    #[instrument(skip(self, dto))]
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateAccountDto,
    ) -> Result<CredentialRecord, AppError> {
        let mut record = self.require(id).await?;

        if let Some(name) = dto.name {
            record.name = name;
        }
        if let Some(email) = dto.email {
            record.email = normalize_email(&email);
        }
        if let Some(password) = dto.password {
            record.password_hash = hash_password(&password)?;
        }

        self.store.save(&record).await
    }

    /// Removes the account and returns its last-known state, token pair
    /// included. Cross-entity guards (a parent's dependent students) are
    /// checked by the role module before this is called.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<CredentialRecord, AppError> {
        let record = self.require(id).await?;
        self.store.remove(&record).await?;
        info!(role = %self.role, account_id = id, "Account removed");
        Ok(record)
    }
}
