use super::*;

// =============================================================
// read_hints
// =============================================================

#[test]
fn read_hints_empty_storage_has_no_hints() {
    let storage = MemoryStorage::new();
    let hints = read_hints(&storage);
    assert!(!hints.any());
}

#[test]
fn read_hints_detects_well_formed_blobs() {
    let storage = MemoryStorage::new();
    storage.set(Scope::Local, USER_KEY, r#"{"id":1,"role":"customer"}"#);
    let hints = read_hints(&storage);
    assert!(hints.user);
    assert!(!hints.admin);
    assert!(hints.has(SessionType::User));
}

#[test]
fn read_hints_discards_malformed_blob() {
    let storage = MemoryStorage::new();
    storage.set(Scope::Local, ADMIN_KEY, "{not json");
    let hints = read_hints(&storage);
    assert!(!hints.admin);
    assert_eq!(storage.get(Scope::Local, ADMIN_KEY), None);
}

#[test]
fn read_hints_discards_non_object_blob() {
    let storage = MemoryStorage::new();
    storage.set(Scope::Local, USER_KEY, "null");
    storage.set(Scope::Local, ADMIN_KEY, "{}");
    let hints = read_hints(&storage);
    assert!(!hints.any());
    assert!(storage.is_empty());
}

#[test]
fn hints_only_consult_local_scope() {
    let storage = MemoryStorage::new();
    storage.set(Scope::Session, USER_KEY, r#"{"id":1}"#);
    assert!(!read_hints(&storage).user);
}

// =============================================================
// write / clear
// =============================================================

#[test]
fn write_hint_stores_json_under_kind_key() {
    let storage = MemoryStorage::new();
    write_hint(&storage, SessionType::Admin, &serde_json::json!({ "id": "a1" }));
    assert_eq!(storage.get(Scope::Local, ADMIN_KEY).as_deref(), Some(r#"{"id":"a1"}"#));
}

#[test]
fn clear_session_hints_keeps_flow_markers() {
    let storage = MemoryStorage::new();
    storage.set(Scope::Local, USER_KEY, "{}");
    storage.set(Scope::Local, ADMIN_KEY, "{}");
    storage.set(Scope::Local, RESET_EMAIL_KEY, "a@b.c");
    clear_session_hints(&storage);
    assert_eq!(storage.len(), 1);
    assert!(has_marker(&storage, Scope::Local, RESET_EMAIL_KEY));
}

#[test]
fn clear_all_removes_every_owned_key() {
    let storage = MemoryStorage::new();
    for (scope, key) in ALL_KEYS {
        storage.set(*scope, key, "x");
    }
    storage.set(Scope::Local, "theme", "dark");
    clear_all(&storage);
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get(Scope::Local, "theme").as_deref(), Some("dark"));
}

// =============================================================
// markers
// =============================================================

#[test]
fn has_marker_ignores_blank_values() {
    let storage = MemoryStorage::new();
    storage.set(Scope::Session, RESET_TOKEN_KEY, "  ");
    assert!(!has_marker(&storage, Scope::Session, RESET_TOKEN_KEY));
}

#[test]
fn marker_is_true_requires_literal_true() {
    let storage = MemoryStorage::new();
    storage.set(Scope::Session, OTP_VERIFIED_KEY, "yes");
    assert!(!marker_is_true(&storage, Scope::Session, OTP_VERIFIED_KEY));
    storage.set(Scope::Session, OTP_VERIFIED_KEY, "true");
    assert!(marker_is_true(&storage, Scope::Session, OTP_VERIFIED_KEY));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_empty_outside_the_browser() {
    let storage = BrowserStorage;
    storage.set(Scope::Local, USER_KEY, "{}");
    assert_eq!(storage.get(Scope::Local, USER_KEY), None);
}
