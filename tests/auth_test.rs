use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use keygate::auth::{AuthorizationGate, Claims, GateRejection, TokenIssuer};
use keygate::error::KeygateError;
use keygate::storage::{CredentialStore, MemoryCredentialStore};

const SECRET: &str = "integration-k3y_0192837465_ABCDEFGHIJ";
const OTHER_SECRET: &str = "another-k3y_9876543210_ZYXWVUTSRQPO";

fn issuer() -> TokenIssuer {
    TokenIssuer::new(SECRET, Duration::hours(72))
}

#[test]
fn test_token_creation_and_validation() {
    let issued = issuer().issue("a@x.com").unwrap();
    assert!(!issued.token.is_empty());

    let verified = AuthorizationGate::new(SECRET).verify(&issued.token).unwrap();
    assert_eq!(verified.subject(), "a@x.com");
}

#[test]
fn test_token_validity_window() {
    let gate = AuthorizationGate::new(SECRET);
    let t = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    let issued = issuer().issue_at("a@x.com", t).unwrap();

    assert_eq!(issued.claims.exp, (t + Duration::hours(72)).timestamp());
    assert!(gate.verify_at(&issued.token, t + Duration::hours(1)).is_ok());
    assert_eq!(
        gate.verify_at(&issued.token, t + Duration::hours(73)),
        Err(GateRejection::Expired)
    );
}

#[test]
fn test_foreign_secret_always_rejected() {
    let gate = AuthorizationGate::new(SECRET);
    let foreign = TokenIssuer::new(OTHER_SECRET, Duration::hours(72));

    for subject in ["a@x.com", "admin@x.com", ""] {
        let issued = foreign.issue(subject).unwrap();
        assert_eq!(
            gate.verify(&issued.token),
            Err(GateRejection::InvalidSignature)
        );
    }
}

#[test]
fn test_other_algorithm_rejected() {
    let claims = Claims::new("a@x.com".into(), Utc::now(), Duration::hours(72)).unwrap();
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        AuthorizationGate::new(SECRET).verify(&token),
        Err(GateRejection::InvalidSignature)
    );
}

#[test]
fn test_missing_expiry_rejected() {
    let token = encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "sub": "a@x.com" }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        AuthorizationGate::new(SECRET).verify(&token),
        Err(GateRejection::InvalidSignature)
    );
}

#[test]
fn test_gate_rejection_is_unauthorized() {
    assert_eq!(
        KeygateError::from(GateRejection::Expired),
        KeygateError::Unauthorized
    );
}

#[tokio::test]
async fn test_authenticate_success() {
    let store = MemoryCredentialStore::new();
    store.register("a@x.com", "A", "p").await.unwrap();

    let issued = issuer().authenticate(&store, "a@x.com", "p").await.unwrap();
    assert_eq!(issued.claims.sub, "a@x.com");
    assert!(AuthorizationGate::new(SECRET).verify(&issued.token).is_ok());
}

#[tokio::test]
async fn test_authenticate_failures_are_indistinguishable() {
    let store = MemoryCredentialStore::new();
    store.register("a@x.com", "A", "p").await.unwrap();

    let wrong_password = issuer().authenticate(&store, "a@x.com", "nope").await;
    let unknown_email = issuer().authenticate(&store, "ghost@x.com", "p").await;

    assert_eq!(wrong_password.unwrap_err(), KeygateError::InvalidCredentials);
    assert_eq!(unknown_email.unwrap_err(), KeygateError::InvalidCredentials);
}
