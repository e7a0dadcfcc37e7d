use axum::http::{Method, StatusCode};

use crate::api::errors::ApiError;
use crate::nav::guard::SessionView;
use crate::schemas::user::Role;
use crate::session::{RegisterProfile, SessionStore};
use crate::test_support::{connect, connect_with_storage, login_ok, StubBackend};

#[tokio::test]
async fn login_persists_and_restart_restores() {
    let backend = StubBackend::start().await;
    login_ok(&backend, "teacher", "jwt-456");

    let ctx = connect(&backend);
    let user = ctx.session.login(&ctx.client, "ada@example.com", "secret").await.unwrap();
    assert_eq!(user.role, Role::Teacher);
    assert_eq!(ctx.session.token().as_deref(), Some("jwt-456"));

    // A fresh store over the same directory is a process restart.
    let restarted = connect_with_storage(&backend, ctx.storage_dir.clone());
    assert_eq!(restarted.session.token().as_deref(), Some("jwt-456"));
    assert_eq!(restarted.session.view(), SessionView::Authenticated(Role::Teacher));
}

#[tokio::test]
async fn logout_removes_the_persisted_session() {
    let backend = StubBackend::start().await;
    login_ok(&backend, "student", "jwt-789");

    let ctx = connect(&backend);
    ctx.session.login(&ctx.client, "ada@example.com", "secret").await.unwrap();
    ctx.session.logout();
    assert!(ctx.session.current_user().is_none());

    let restarted = connect_with_storage(&backend, ctx.storage_dir.clone());
    assert_eq!(restarted.session.view(), SessionView::Anonymous);
}

#[tokio::test]
async fn failed_login_leaves_the_session_anonymous() {
    let backend = StubBackend::start().await;
    backend.on(
        Method::POST,
        "/auth/login",
        StatusCode::UNAUTHORIZED,
        serde_json::json!({"message": "Invalid credentials"}),
    );

    let ctx = connect(&backend);
    let err = ctx.session.login(&ctx.client, "ada@example.com", "wrong").await.unwrap_err();
    // The 401 policy fires even here; either way nothing is stored.
    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(ctx.session.view(), SessionView::Anonymous);
}

#[tokio::test]
async fn register_rejects_mismatched_passwords_before_the_network() {
    let backend = StubBackend::start().await;
    let ctx = connect(&backend);

    let err = ctx
        .session
        .register(
            &ctx.client,
            RegisterProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret2".to_string(),
                role: Role::Student,
                subjects: Vec::new(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Passwords do not match");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn teacher_registration_requires_a_subject() {
    let backend = StubBackend::start().await;
    let ctx = connect(&backend);

    let err = ctx
        .session
        .register(
            &ctx.client,
            RegisterProfile {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
                role: Role::Teacher,
                subjects: Vec::new(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Teachers must add at least one subject");
    assert!(backend.requests().is_empty());
}

#[test]
fn corrupt_session_file_reads_as_anonymous() {
    let dir = crate::test_support::temp_storage_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let storage = crate::session::storage::SessionStorage::new(&dir);
    std::fs::write(storage.path(), "{not json").unwrap();

    let store = SessionStore::new(storage);
    store.init();
    assert_eq!(store.view(), SessionView::Anonymous);
}
