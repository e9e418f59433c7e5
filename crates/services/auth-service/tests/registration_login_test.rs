//! Registration and login flows over the in-memory credential store.

use std::sync::Arc;

use auth_service_lib::config::AuthServiceConfig;
use auth_service_lib::repository::{CollaboratorRepository, InMemoryCollaboratorStore};
use auth_service_lib::token::TokenVerification;
use auth_service_lib::AuthComponents;
use common::{AppError, JwtConfig};
use domain::Registration;
use tokio_test::assert_ok;

const SECRET: &str = "integration-test-secret-at-least-32-bytes";

fn config() -> AuthServiceConfig {
    AuthServiceConfig {
        jwt: JwtConfig {
            secret: Some(SECRET.to_string()),
            expiration_hours: 24,
        },
        ..Default::default()
    }
}

fn setup() -> (AuthComponents, Arc<InMemoryCollaboratorStore>) {
    let store = Arc::new(InMemoryCollaboratorStore::new());
    let components = AuthComponents::build(&config(), store.clone()).unwrap();
    (components, store)
}

fn registration(code: &str, email: &str, password: &str, confirmation: &str) -> Registration {
    Registration {
        code: code.to_string(),
        display_name: format!("Collaborator {}", code),
        email: email.to_string(),
        password: password.to_string(),
        password_confirmation: confirmation.to_string(),
    }
}

#[tokio::test]
async fn test_register_then_login_scenario() {
    let (components, _) = setup();
    let auth = components.auth;

    let issued = assert_ok!(
        auth.register(registration("E1", "a@x.com", "Secret1", "Secret1"))
            .await
    );
    assert!(auth.verify_token(&issued.access_token).is_valid());

    let login = assert_ok!(auth.login("E1", "Secret1").await);
    match auth.verify_token(&login.access_token) {
        TokenVerification::Valid(claims) => assert_eq!(claims.sub, "E1"),
        other => panic!("expected valid token, got {:?}", other),
    }

    let wrong = auth.login("E1", "wrong").await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_mismatched_confirmation_leaves_store_empty() {
    let (components, store) = setup();

    let result = components
        .auth
        .register(registration("E1", "a@x.com", "Secret1", "Secret2"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_duplicate_email_keeps_single_record() {
    let (components, store) = setup();
    let auth = components.auth;

    auth.register(registration("E1", "a@x.com", "Secret1", "Secret1"))
        .await
        .unwrap();
    let second = auth
        .register(registration("E2", "a@x.com", "Secret2", "Secret2"))
        .await;

    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(store.len().await, 1);
    assert!(store.find_by_code("E2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_code_rejected_by_store() {
    let (components, store) = setup();
    let auth = components.auth;

    auth.register(registration("E1", "a@x.com", "Secret1", "Secret1"))
        .await
        .unwrap();
    let second = auth
        .register(registration("E1", "b@x.com", "Secret1", "Secret1"))
        .await;

    assert!(matches!(second, Err(AppError::Conflict(ref m)) if m == "Collaborator code"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_login_unknown_code() {
    let (components, _) = setup();
    let result = components.auth.login("E404", "Secret1").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_stored_hash_is_not_plaintext() {
    let (components, store) = setup();
    components
        .auth
        .register(registration("E1", "a@x.com", "Secret1", "Secret1"))
        .await
        .unwrap();

    let record = store.find_by_code("E1").await.unwrap().unwrap();
    assert!(!record.password_hash.is_empty());
    assert_ne!(record.password_hash, "Secret1");
    assert!(record.verify_password("Secret1"));
}

#[tokio::test]
async fn test_tokens_survive_rebuild_with_configured_secret() {
    let (first, store) = setup();
    let issued = first
        .auth
        .register(registration("E1", "a@x.com", "Secret1", "Secret1"))
        .await
        .unwrap();

    // Same secret, new process-equivalent wiring
    let second = AuthComponents::build(&config(), store).unwrap();
    assert!(second.auth.verify_token(&issued.access_token).is_valid());
}

#[tokio::test]
async fn test_tokens_do_not_survive_generated_key() {
    let store = Arc::new(InMemoryCollaboratorStore::new());
    let ephemeral = AuthServiceConfig::default();

    let first = AuthComponents::build(&ephemeral, store.clone()).unwrap();
    let issued = first
        .auth
        .register(registration("E1", "a@x.com", "Secret1", "Secret1"))
        .await
        .unwrap();

    let restarted = AuthComponents::build(&ephemeral, store).unwrap();
    assert_eq!(
        restarted.auth.verify_token(&issued.access_token),
        TokenVerification::Invalid
    );
}
