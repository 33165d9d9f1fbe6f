use chrono::{Duration, TimeZone, Utc};
use colegio::config::jwt::JwtConfig;
use colegio::utils::jwt::{create_access_token, create_refresh_token, verify_token};

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

fn test_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let result = create_access_token(42, "test@example.com", &jwt_config, test_now());

    assert!(result.is_ok());
    let token = result.unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_round_trip_recovers_subject_and_email() {
    let jwt_config = get_test_jwt_config();
    let now = test_now();

    let token = create_access_token(42, "test@example.com", &jwt_config, now).unwrap();
    let claims = verify_token(&token, &jwt_config, now).unwrap();

    assert_eq!(claims.sub, "42");
    assert_eq!(claims.email, "test@example.com");
}

#[test]
fn test_access_token_expiry_matches_config() {
    let jwt_config = get_test_jwt_config();
    let now = test_now();

    let token = create_access_token(1, "a@b.com", &jwt_config, now).unwrap();
    let claims = verify_token(&token, &jwt_config, now).unwrap();

    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );
}

#[test]
fn test_refresh_token_expiry_matches_config() {
    let jwt_config = get_test_jwt_config();
    let now = test_now();

    let token = create_refresh_token(1, "a@b.com", &jwt_config, now).unwrap();
    let claims = verify_token(&token, &jwt_config, now).unwrap();

    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.refresh_token_expiry as usize
    );
}

#[test]
fn test_verify_fails_after_ttl_elapses() {
    let jwt_config = get_test_jwt_config();
    let issued_at = test_now();

    let token = create_access_token(42, "test@example.com", &jwt_config, issued_at).unwrap();

    // Still valid one second before the boundary.
    let result = verify_token(&token, &jwt_config, issued_at + Duration::seconds(3599));
    assert!(result.is_ok());

    // Expired once the TTL has passed.
    let result = verify_token(&token, &jwt_config, issued_at + Duration::seconds(3601));
    assert!(result.is_err());
}

#[test]
fn test_verify_fails_at_exact_expiry() {
    let jwt_config = get_test_jwt_config();
    let issued_at = test_now();

    let token = create_access_token(42, "test@example.com", &jwt_config, issued_at).unwrap();

    let result = verify_token(&token, &jwt_config, issued_at + Duration::seconds(3600));
    assert!(result.is_err());
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("invalid.token.here", &jwt_config, test_now());

    assert!(result.is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let now = test_now();

    let token = create_access_token(42, "test@example.com", &jwt_config, now).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    };

    let result = verify_token(&token, &wrong_jwt_config, now);

    assert!(result.is_err());
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "",
        "not.enough.parts",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        let result = verify_token(token, &jwt_config, test_now());
        assert!(result.is_err(), "expected failure for {:?}", token);
    }
}

#[test]
fn test_different_accounts_get_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let now = test_now();

    let token1 = create_access_token(1, "user1@example.com", &jwt_config, now).unwrap();
    let token2 = create_access_token(2, "user2@example.com", &jwt_config, now).unwrap();

    assert_ne!(token1, token2);

    let claims1 = verify_token(&token1, &jwt_config, now).unwrap();
    let claims2 = verify_token(&token2, &jwt_config, now).unwrap();

    assert_eq!(claims1.sub, "1");
    assert_eq!(claims2.sub, "2");
}
