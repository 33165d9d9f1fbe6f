use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::modules::accounts::model::AccountRole;
use crate::modules::accounts::service::AccountService;
use crate::modules::accounts::store::PgCredentialStore;
use crate::utils::clock::SystemClock;
use crate::utils::email::EmailService;

/// The production account-service instantiation: Postgres store, SMTP
/// mailer, system clock.
pub type Accounts = AccountService<PgCredentialStore, EmailService, SystemClock>;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds the account service scoped to one role. All three roles share
    /// the same implementation; only the backing table differs.
    pub fn accounts(&self, role: AccountRole) -> Accounts {
        AccountService::new(
            PgCredentialStore::new(self.db.clone(), role),
            EmailService::new(self.email_config.clone()),
            SystemClock,
            self.jwt_config.clone(),
            role,
        )
    }
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
