use super::*;
use crate::guard::decision::{GuardOutcome, evaluate};
use crate::net::types::{IdentityResponse, Role};
use crate::session::storage::{ADMIN_KEY, MemoryStorage, OTP_VERIFIED_KEY, RESET_EMAIL_KEY, USER_KEY};
use crate::session::test_support::*;

fn store(backend: FakeBackend) -> SessionStore<FakeBackend, MemoryStorage> {
    SessionStore::new(backend, MemoryStorage::new())
}

fn hint_user(store: &SessionStore<FakeBackend, MemoryStorage>) {
    store.storage().set(Scope::Local, USER_KEY, &customer_json().to_string());
}

fn hint_admin(store: &SessionStore<FakeBackend, MemoryStorage>) {
    store.storage().set(Scope::Local, ADMIN_KEY, &admin_json().to_string());
}

fn current(validation: Validation) -> Session {
    match validation {
        Validation::Current(session) => session,
        Validation::Stale => panic!("expected current validation"),
    }
}

// =============================================================
// No hint
// =============================================================

#[tokio::test]
async fn no_hint_resolves_signed_out_without_fetch() {
    let store = store(FakeBackend::default().with_user(authenticated(customer_json())));
    let session = current(store.validate().await);
    assert!(!session.authenticated);
    assert!(!session.loading);
    assert_eq!(store.backend().identity_call_count(), 0);
}

#[tokio::test]
async fn malformed_hint_is_discarded_without_fetch() {
    let store = store(FakeBackend::default());
    store.storage().set(Scope::Local, USER_KEY, "not-json");
    let session = current(store.validate().await);
    assert!(!session.authenticated);
    assert_eq!(store.backend().identity_call_count(), 0);
    assert_eq!(store.storage().get(Scope::Local, USER_KEY), None);
}

// =============================================================
// Successful validation
// =============================================================

#[tokio::test]
async fn user_hint_validates_against_backend() {
    let store = store(FakeBackend::default().with_user(authenticated(customer_json())));
    hint_user(&store);
    let session = current(store.validate().await);
    assert!(session.authenticated);
    assert_eq!(session.role(), Some(Role::Customer));
    assert_eq!(session.session_type, Some(SessionType::User));
    assert_eq!(*store.backend().identity_calls.lock().unwrap(), vec![SessionType::User]);
}

#[tokio::test]
async fn customer_without_id_validates_and_passes_any_role_guard() {
    let store = store(FakeBackend::default().with_user(authenticated(serde_json::json!({ "role": "customer" }))));
    store.storage().set(Scope::Local, USER_KEY, r#"{"role":"customer"}"#);
    let session = current(store.validate().await);
    assert!(session.authenticated);
    assert_eq!(session.role(), Some(Role::Customer));
    assert_eq!(evaluate(&session, &[], "/login", "/settings"), GuardOutcome::Allow);
}

#[tokio::test]
async fn hint_is_refreshed_with_authoritative_record() {
    let store = store(FakeBackend::default().with_user(authenticated(provider_json("Local Guide"))));
    store.storage().set(Scope::Local, USER_KEY, r#"{"id":12,"role":"customer"}"#);
    let session = current(store.validate().await);
    assert_eq!(session.role(), Some(Role::ServiceProvider));
    let cached: serde_json::Value =
        serde_json::from_str(&store.storage().get(Scope::Local, USER_KEY).unwrap()).unwrap();
    assert_eq!(cached["role"], "service_provider");
}

#[tokio::test]
async fn admin_hint_is_checked_first() {
    let store = store(
        FakeBackend::default()
            .with_admin(authenticated(admin_json()))
            .with_user(authenticated(customer_json())),
    );
    hint_user(&store);
    hint_admin(&store);
    let session = current(store.validate().await);
    assert_eq!(session.role(), Some(Role::Admin));
    assert_eq!(*store.backend().identity_calls.lock().unwrap(), vec![SessionType::Admin]);
}

#[tokio::test]
async fn failed_admin_hint_falls_back_to_user_and_is_removed() {
    let store = store(FakeBackend::default().with_user(authenticated(customer_json())));
    hint_user(&store);
    hint_admin(&store);
    let session = current(store.validate().await);
    assert_eq!(session.role(), Some(Role::Customer));
    assert_eq!(store.storage().get(Scope::Local, ADMIN_KEY), None);
    assert!(store.storage().get(Scope::Local, USER_KEY).is_some());
}

// =============================================================
// Failure: fail closed, clear hints
// =============================================================

#[tokio::test]
async fn backend_error_clears_both_hints() {
    let store = store(
        FakeBackend::default()
            .with_user(Err(ApiError::Status(500)))
            .with_admin(Err(ApiError::Network("offline".to_owned()))),
    );
    hint_user(&store);
    hint_admin(&store);
    let session = current(store.validate().await);
    assert!(!session.authenticated);
    assert!(!session.loading);
    assert!(session.error.is_some());
    assert_eq!(store.storage().get(Scope::Local, USER_KEY), None);
    assert_eq!(store.storage().get(Scope::Local, ADMIN_KEY), None);
}

#[tokio::test]
async fn unauthenticated_answer_clears_hints_without_error() {
    let store = store(FakeBackend::default());
    hint_user(&store);
    let session = current(store.validate().await);
    assert!(!session.authenticated);
    assert_eq!(session.error, None);
    assert_eq!(store.storage().get(Scope::Local, USER_KEY), None);
}

#[tokio::test]
async fn authenticated_without_record_fails_closed() {
    let store = store(FakeBackend::default().with_user(Ok(IdentityResponse { authenticated: true, user: None })));
    hint_user(&store);
    let session = current(store.validate().await);
    assert!(!session.authenticated);
    assert!(store.storage().is_empty());
}

#[tokio::test]
async fn undecodable_record_fails_closed() {
    let store = store(FakeBackend::default().with_user(authenticated(serde_json::json!({ "id": 1, "role": "wizard" }))));
    hint_user(&store);
    let session = current(store.validate().await);
    assert!(!session.authenticated);
    assert!(session.error.unwrap().starts_with("malformed response"));
}

// =============================================================
// Ordering
// =============================================================

#[tokio::test]
async fn superseded_validation_is_stale_and_leaves_storage_alone() {
    let store = store(FakeBackend::default().with_user(Err(ApiError::Status(500))));
    hint_user(&store);
    let older = store.next_generation();
    let _newer = store.next_generation();
    assert_eq!(store.validate_generation(older).await, Validation::Stale);
    assert!(store.storage().get(Scope::Local, USER_KEY).is_some());
}

#[tokio::test]
async fn validation_superseded_mid_fetch_is_stale() {
    let store = store(FakeBackend::default().with_user(authenticated(customer_json())));
    hint_user(&store);
    let before = store.storage().get(Scope::Local, USER_KEY);
    let generation = Arc::clone(&store.generation);
    store.backend().set_during_fetch(move || {
        generation.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(store.validate().await, Validation::Stale);
    assert_eq!(store.backend().identity_call_count(), 1);
    assert_eq!(store.storage().get(Scope::Local, USER_KEY), before);
    assert_eq!(store.storage().get(Scope::Local, ADMIN_KEY), None);
}

#[tokio::test]
async fn logout_invalidates_in_flight_generation() {
    let store = store(FakeBackend::default().with_user(authenticated(customer_json())));
    hint_user(&store);
    let in_flight = store.next_generation();
    store.logout(Some(SessionType::User)).await;
    assert!(!store.is_current(in_flight));
}

// =============================================================
// Logout
// =============================================================

#[tokio::test]
async fn logout_clears_all_keys_and_returns_user_entry() {
    let store = store(FakeBackend::default());
    hint_user(&store);
    store.storage().set(Scope::Local, RESET_EMAIL_KEY, "a@b.c");
    store.storage().set(Scope::Session, OTP_VERIFIED_KEY, "true");
    let target = store.logout(Some(SessionType::User)).await;
    assert_eq!(target, "/login");
    assert!(store.storage().is_empty());
    assert_eq!(*store.backend().logout_calls.lock().unwrap(), vec![SessionType::User]);
}

#[tokio::test]
async fn logout_proceeds_when_backend_fails() {
    let store = store(FakeBackend::default().with_logout(Err(ApiError::Network("down".to_owned()))));
    hint_admin(&store);
    let target = store.logout(Some(SessionType::Admin)).await;
    assert_eq!(target, "/admin/login");
    assert!(store.storage().is_empty());
}

#[tokio::test]
async fn logout_without_active_session_skips_backend() {
    let store = store(FakeBackend::default());
    assert_eq!(store.logout(None).await, "/login");
    assert_eq!(store.backend().logout_call_count(), 0);
}

// =============================================================
// Sign in
// =============================================================

#[test]
fn sign_in_writes_hint_and_drops_other_kind() {
    let store = store(FakeBackend::default());
    hint_admin(&store);
    let session = store.sign_in(SessionType::User, customer_json()).unwrap();
    assert_eq!(session.role(), Some(Role::Customer));
    assert!(store.storage().get(Scope::Local, USER_KEY).is_some());
    assert_eq!(store.storage().get(Scope::Local, ADMIN_KEY), None);
}

#[test]
fn sign_in_rejects_invalid_record() {
    let store = store(FakeBackend::default());
    let result = store.sign_in(SessionType::User, serde_json::json!({ "name": "no role" }));
    assert!(matches!(result, Err(ApiError::Decode(_))));
    assert!(store.storage().is_empty());
}

#[test]
fn entry_path_depends_on_active_type() {
    assert_eq!(entry_path(Some(SessionType::Admin)), "/admin/login");
    assert_eq!(entry_path(Some(SessionType::User)), "/login");
    assert_eq!(entry_path(None), "/login");
}
