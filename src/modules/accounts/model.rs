use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// The three account roles. Their credential records are structurally
/// identical; each role persists to its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Student,
    Parent,
    Professor,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Student => "student",
            AccountRole::Parent => "parent",
            AccountRole::Professor => "professor",
        }
    }

    /// Table backing this role's credential records.
    pub fn table(&self) -> &'static str {
        match self {
            AccountRole::Student => "students",
            AccountRole::Parent => "parents",
            AccountRole::Professor => "professors",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(AccountRole::Student),
            "parent" => Ok(AccountRole::Parent),
            "professor" => Ok(AccountRole::Professor),
            _ => Err(()),
        }
    }
}

/// Persisted per-account credential record: hashed password, the single
/// outstanding session-token pair, and the recovery window.
///
/// `revision` is the optimistic-locking counter; every successful save
/// bumps it, and a save against a stale revision is rejected.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CredentialRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub access_token: Option<String>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub recovery_code: Option<String>,
    pub recovery_code_expires_at: Option<DateTime<Utc>>,
    pub revision: i64,
}

/// The freshly issued session pair returned by login and refresh.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Public projection of a credential record: identity plus the last-known
/// token pair. The password hash and recovery state never leave the
/// service layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountSummary {
    pub id: i64,
    pub name: String,
    pub role: AccountRole,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AccountSummary {
    pub fn from_record(record: &CredentialRecord, role: AccountRole) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            role,
            access_token: record.access_token.clone(),
            refresh_token: record.refresh_token.clone(),
        }
    }
}

/// Partial update applied to any role's account. Passwords are re-hashed
/// by the service before they reach the store.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of the recovery-code verification step.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyRecoveryDto {
    #[validate(length(min = 1))]
    pub code: String,
}

/// Body of the final password-reset step.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordDto {
    #[validate(length(min = 1))]
    pub code: String,
    #[serde(alias = "newPassword")]
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            AccountRole::Student,
            AccountRole::Parent,
            AccountRole::Professor,
        ] {
            assert_eq!(role.as_str().parse::<AccountRole>(), Ok(role));
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!("admin".parse::<AccountRole>().is_err());
        assert!("".parse::<AccountRole>().is_err());
        assert!("Student".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_summary_never_carries_secrets() {
        let record = CredentialRecord {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            access_token: Some("access".to_string()),
            access_token_expires_at: None,
            refresh_token: Some("refresh".to_string()),
            refresh_token_expires_at: None,
            recovery_code: Some("ab12cd".to_string()),
            recovery_code_expires_at: None,
            revision: 3,
        };

        let summary = AccountSummary::from_record(&record, AccountRole::Parent);
        let json = serde_json::to_string(&summary).unwrap();

        assert!(json.contains("\"access\""));
        assert!(json.contains("\"refresh\""));
        assert!(!json.contains("secret"));
        assert!(!json.contains("ab12cd"));
    }
}
