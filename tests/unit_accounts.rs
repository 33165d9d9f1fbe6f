//! Account-service tests against the in-memory store, recording mailer and
//! fixed clock, covering the login, refresh, recovery and removal flows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use colegio::config::jwt::JwtConfig;
use colegio::modules::accounts::model::{AccountRole, UpdateAccountDto};
use colegio::modules::accounts::service::AccountService;
use colegio::modules::accounts::store::CredentialStore;
use colegio::testing::{FixedClock, MemoryCredentialStore, RecordingMailer};

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

struct Harness {
    service: AccountService<MemoryCredentialStore, RecordingMailer, FixedClock>,
    store: MemoryCredentialStore,
    mailer: RecordingMailer,
    clock: FixedClock,
}

fn harness() -> Harness {
    let store = MemoryCredentialStore::new();
    let mailer = RecordingMailer::new();
    let clock = FixedClock::new(test_start());

    let service = AccountService::new(
        store.clone(),
        mailer.clone(),
        clock.clone(),
        test_jwt_config(),
        AccountRole::Parent,
    );

    Harness {
        service,
        store,
        mailer,
        clock,
    }
}

#[tokio::test]
async fn test_login_returns_pair_and_persists_it() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let pair = h.service.login("ana@example.com", "hunter2secret").await.unwrap();

    let stored = h.store.get(seeded.id).unwrap();
    assert_eq!(stored.access_token.as_deref(), Some(pair.access_token.as_str()));
    assert_eq!(stored.refresh_token.as_deref(), Some(pair.refresh_token.as_str()));
    assert_eq!(
        stored.access_token_expires_at,
        Some(test_start() + Duration::seconds(3600))
    );
    assert_eq!(
        stored.refresh_token_expires_at,
        Some(test_start() + Duration::seconds(604800))
    );
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let result = h.service.login("Ana@Example.COM", "hunter2secret").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized_and_issues_nothing() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let err = h.service.login("ana@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    let stored = h.store.get(seeded.id).unwrap();
    assert!(stored.access_token.is_none());
    assert!(stored.refresh_token.is_none());
}

#[tokio::test]
async fn test_login_unknown_email_is_unauthorized() {
    let h = harness();

    let err = h.service.login("nobody@example.com", "whatever").await.unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_the_stored_pair() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let first = h.service.login("ana@example.com", "hunter2secret").await.unwrap();

    // Different issue time so the new tokens differ from the old ones.
    h.clock.advance(Duration::seconds(60));
    let second = h.service.refresh(&first.refresh_token).await.unwrap();

    assert_ne!(first.refresh_token, second.refresh_token);
    let stored = h.store.get(seeded.id).unwrap();
    assert_eq!(
        stored.refresh_token.as_deref(),
        Some(second.refresh_token.as_str())
    );
}

#[tokio::test]
async fn test_superseded_refresh_token_is_rejected() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let first = h.service.login("ana@example.com", "hunter2secret").await.unwrap();

    h.clock.advance(Duration::seconds(60));
    h.service.refresh(&first.refresh_token).await.unwrap();

    // The first refresh token is well-formed and unexpired, but no longer
    // the stored one. Replay must fail.
    let err = h.service.refresh(&first.refresh_token).await.unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_fails_after_expiry() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let pair = h.service.login("ana@example.com", "hunter2secret").await.unwrap();

    h.clock.advance(Duration::seconds(604801));
    let err = h.service.refresh(&pair.refresh_token).await.unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_garbage_token_is_unauthorized() {
    let h = harness();

    let err = h.service.refresh("not.a.token").await.unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_refresh_token_fails_closed() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    assert!(h.service.verify_refresh_token("garbage").await.unwrap().is_none());

    // A token we sign ourselves for a subject that has never logged in:
    // decodes fine, but nothing is stored, so it must not verify.
    let forged = colegio::utils::jwt::create_refresh_token(
        1,
        "ana@example.com",
        &test_jwt_config(),
        test_start(),
    )
    .unwrap();
    assert!(h.service.verify_refresh_token(&forged).await.unwrap().is_none());
}

#[tokio::test]
async fn test_initiate_recovery_unknown_email_is_not_found() {
    let h = harness();

    let err = h
        .service
        .initiate_password_recovery("nobody@example.com")
        .await
        .unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_initiate_recovery_stores_code_and_mails_it() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    h.service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap();

    let stored = h.store.get(seeded.id).unwrap();
    let code = stored.recovery_code.expect("code persisted");
    assert_eq!(code.len(), 6);
    assert_eq!(
        stored.recovery_code_expires_at,
        Some(test_start() + Duration::seconds(3600))
    );

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "ana@example.com");
    assert_eq!(sent[0].1, code);
}

#[tokio::test]
async fn test_recovery_code_window() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    h.service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap();
    let code = h.mailer.last_code().unwrap();

    // Half an hour in: still valid.
    h.clock.advance(Duration::minutes(30));
    assert!(
        h.service
            .verify_recovery_code("ana@example.com", &code)
            .await
            .is_ok()
    );

    // Sixty-one minutes in: expired.
    h.clock.advance(Duration::minutes(31));
    let err = h
        .service
        .verify_recovery_code("ana@example.com", &code)
        .await
        .unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_recovery_code_wrong_code() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    h.service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap();

    let err = h
        .service
        .verify_recovery_code("ana@example.com", "zzzzzz")
        .await
        .unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_password_changes_credential_and_clears_window() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    h.service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap();
    let code = h.mailer.last_code().unwrap();

    h.service
        .reset_password("ana@example.com", &code, "brand-new-pass")
        .await
        .unwrap();

    let stored = h.store.get(seeded.id).unwrap();
    assert!(stored.recovery_code.is_none());
    assert!(stored.recovery_code_expires_at.is_none());

    assert!(h.service.login("ana@example.com", "brand-new-pass").await.is_ok());
    assert!(h.service.login("ana@example.com", "hunter2secret").await.is_err());
}

#[tokio::test]
async fn test_reset_password_is_single_use() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    h.service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap();
    let code = h.mailer.last_code().unwrap();

    h.service
        .reset_password("ana@example.com", &code, "first-new-pass")
        .await
        .unwrap();

    let err = h
        .service
        .reset_password("ana@example.com", &code, "second-new-pass")
        .await
        .unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeated_initiate_overwrites_previous_code() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    h.service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap();
    let first_code = h.mailer.last_code().unwrap();

    h.service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap();
    let second_code = h.mailer.last_code().unwrap();

    if first_code != second_code {
        let err = h
            .service
            .verify_recovery_code("ana@example.com", &first_code)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
    assert!(
        h.service
            .verify_recovery_code("ana@example.com", &second_code)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_mail_failure_surfaces_as_internal() {
    let h = harness();
    h.store.seed("Ana", "ana@example.com", "hunter2secret");

    h.mailer.fail_next_sends(true);
    let err = h
        .service
        .initiate_password_recovery("ana@example.com")
        .await
        .unwrap_err();

    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_update_applies_partial_fields_and_rehashes_password() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let updated = h
        .service
        .update(
            seeded.id,
            UpdateAccountDto {
                name: Some("Ana Maria".to_string()),
                email: Some("Ana.Maria@Example.com".to_string()),
                password: Some("another-secret".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ana Maria");
    assert_eq!(updated.email, "ana.maria@example.com");
    assert_ne!(updated.password_hash, seeded.password_hash);

    assert!(
        h.service
            .login("ana.maria@example.com", "another-secret")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_update_missing_account_is_not_found() {
    let h = harness();

    let err = h
        .service
        .update(
            999,
            UpdateAccountDto {
                name: Some("Ghost".to_string()),
                email: None,
                password: None,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_returns_last_known_tokens() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    let pair = h.service.login("ana@example.com", "hunter2secret").await.unwrap();

    let removed = h.service.remove(seeded.id).await.unwrap();
    assert_eq!(removed.access_token.as_deref(), Some(pair.access_token.as_str()));
    assert_eq!(
        removed.refresh_token.as_deref(),
        Some(pair.refresh_token.as_str())
    );
    assert!(h.store.is_empty());

    let err = h.service.remove(seeded.id).await.unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stale_revision_save_conflicts() {
    let h = harness();
    let seeded = h.store.seed("Ana", "ana@example.com", "hunter2secret");

    // First writer wins and bumps the revision.
    h.store.save(&seeded).await.unwrap();

    // Second writer still holds the old revision.
    let err = h.store.save(&seeded).await.unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::CONFLICT);
}
