//! End-to-end session scenarios against in-memory and file-backed stores.

use nagari_adapters::mock::{ADMIN_EMAIL, ADMIN_PASSWORD};
use nagari_adapters::{FileStore, KeyValueStore, MemoryStore, MockVerifier};
use nagari_backend::auth::{
    allowed_routes, can_access_admin, can_access_portal, AuthContext, AuthError, RouteCategory,
    SessionManager, UserRole,
};
use std::sync::Arc;
use std::time::Duration;

fn session_with(store: Arc<dyn KeyValueStore>) -> SessionManager {
    SessionManager::new(Arc::new(MockVerifier::new()), store)
}

#[tokio::test(start_paused = true)]
async fn admin_login_yields_most_privileged_principal() {
    let session = session_with(Arc::new(MemoryStore::new()));
    session.initialize();

    assert!(session.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);

    let user = session.user().expect("principal after login");
    assert_eq!(user.role, UserRole::SuperAdmin);
    assert_eq!(user.role, UserRole::ALL[0]);
    assert!(session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn unknown_credentials_leave_no_principal() {
    let session = session_with(Arc::new(MemoryStore::new()));
    session.initialize();

    assert!(!session.login("nobody@example.com", "wrong").await);
    assert!(session.user().is_none());
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
}

#[tokio::test(start_paused = true)]
async fn login_waits_for_simulated_latency() {
    let session = session_with(Arc::new(MemoryStore::new()));
    let started = tokio::time::Instant::now();

    assert!(session.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn logout_then_fresh_start_is_anonymous() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let session = session_with(store.clone());
    session.initialize();
    assert!(session.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);

    session.logout();

    let restarted = session_with(store);
    restarted.initialize();
    assert!(!restarted.is_authenticated());

    session.initialize();
    assert!(!session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn principal_survives_restart_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = session_with(Arc::new(FileStore::new(&path)));
    first.initialize();
    assert!(first.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);

    let second = session_with(Arc::new(FileStore::new(&path)));
    assert!(second.is_loading());
    second.initialize();
    assert!(!second.is_loading());
    assert_eq!(second.user(), first.user());

    second.logout();
    let third = session_with(Arc::new(FileStore::new(&path)));
    third.initialize();
    assert!(!third.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn sessions_are_isolated_from_each_other() {
    let a = session_with(Arc::new(MemoryStore::new()));
    let b = session_with(Arc::new(MemoryStore::new()));

    assert!(a.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
    b.initialize();

    assert!(a.is_authenticated());
    assert!(!b.is_authenticated());
}

#[test]
fn context_must_be_installed_before_use() {
    let context = AuthContext::new();
    assert!(matches!(context.session(), Err(AuthError::ContextNotInstalled)));
}

#[test]
fn route_policy_scenarios() {
    assert!(!can_access_admin(UserRole::Visitor));
    assert!(can_access_admin(UserRole::Staff));
    assert!(!can_access_portal(UserRole::BusinessOwner));
    assert!(can_access_portal(UserRole::Resident));

    assert_eq!(
        allowed_routes(UserRole::SuperAdmin),
        vec![RouteCategory::Home, RouteCategory::Portal, RouteCategory::Admin]
    );
    assert_eq!(allowed_routes(UserRole::Visitor), vec![RouteCategory::Home]);
}
