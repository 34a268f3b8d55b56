//! Persisted session hints and auth-flow markers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `user` / `admin` blobs in `localStorage` only tell the session store
//! that a backend session *might* exist. They are never read as identity.
//! Password-reset and email-verification steps leave short-lived markers that
//! auth-flow routes check instead of a logged-in session.
//!
//! TRADE-OFFS
//! ==========
//! Browser storage is shared by every tab and written without locking, so the
//! last write wins. Reads tolerate anything another writer left behind:
//! malformed blobs are removed and treated as absent.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::net::types::SessionType;

pub const USER_KEY: &str = "user";
pub const ADMIN_KEY: &str = "admin";
pub const PENDING_USER_KEY: &str = "pendingUser";
pub const RESET_EMAIL_KEY: &str = "resetEmail";
pub const RESET_TOKEN_KEY: &str = "resetToken";
pub const OTP_VERIFIED_KEY: &str = "otpVerified";

/// Which browser storage area a key lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// `localStorage`: survives tab close.
    Local,
    /// `sessionStorage`: dropped with the tab.
    Session,
}

/// Every key the session layer owns, with its scope.
pub const ALL_KEYS: &[(Scope, &str)] = &[
    (Scope::Local, USER_KEY),
    (Scope::Local, ADMIN_KEY),
    (Scope::Local, PENDING_USER_KEY),
    (Scope::Local, RESET_EMAIL_KEY),
    (Scope::Session, RESET_TOKEN_KEY),
    (Scope::Session, OTP_VERIFIED_KEY),
];

/// Key/value storage with browser semantics. Writes are best-effort.
pub trait HintStorage {
    fn get(&self, scope: Scope, key: &str) -> Option<String>;
    fn set(&self, scope: Scope, key: &str, value: &str);
    fn remove(&self, scope: Scope, key: &str);
}

/// Storage key holding the hint for a session type.
#[must_use]
pub fn hint_key(kind: SessionType) -> &'static str {
    match kind {
        SessionType::User => USER_KEY,
        SessionType::Admin => ADMIN_KEY,
    }
}

/// Which session types have a well-formed hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hints {
    pub user: bool,
    pub admin: bool,
}

impl Hints {
    #[must_use]
    pub fn any(self) -> bool {
        self.user || self.admin
    }

    #[must_use]
    pub fn has(self, kind: SessionType) -> bool {
        match kind {
            SessionType::User => self.user,
            SessionType::Admin => self.admin,
        }
    }
}

/// Read both hints, discarding blobs that are not JSON objects.
pub fn read_hints<S: HintStorage + ?Sized>(storage: &S) -> Hints {
    Hints {
        user: read_hint(storage, SessionType::User),
        admin: read_hint(storage, SessionType::Admin),
    }
}

fn read_hint<S: HintStorage + ?Sized>(storage: &S, kind: SessionType) -> bool {
    let key = hint_key(kind);
    let Some(raw) = storage.get(Scope::Local, key) else {
        return false;
    };
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Object(map)) if !map.is_empty() => true,
        Ok(_) => {
            log::warn!("discarding empty session hint `{key}`");
            storage.remove(Scope::Local, key);
            false
        }
        Err(e) => {
            log::warn!("discarding malformed session hint `{key}`: {e}");
            storage.remove(Scope::Local, key);
            false
        }
    }
}

/// Cache `record` as the hint for `kind`.
pub fn write_hint<S: HintStorage + ?Sized, T: Serialize>(storage: &S, kind: SessionType, record: &T) {
    match serde_json::to_string(record) {
        Ok(raw) => storage.set(Scope::Local, hint_key(kind), &raw),
        Err(e) => log::warn!("failed to encode session hint: {e}"),
    }
}

/// Remove both session hints.
pub fn clear_session_hints<S: HintStorage + ?Sized>(storage: &S) {
    storage.remove(Scope::Local, USER_KEY);
    storage.remove(Scope::Local, ADMIN_KEY);
}

/// Remove every key the session layer owns.
pub fn clear_all<S: HintStorage + ?Sized>(storage: &S) {
    for (scope, key) in ALL_KEYS {
        storage.remove(*scope, key);
    }
}

/// `true` when a marker is present and non-blank.
pub fn has_marker<S: HintStorage + ?Sized>(storage: &S, scope: Scope, key: &str) -> bool {
    storage.get(scope, key).is_some_and(|v| !v.trim().is_empty())
}

/// `true` when a marker holds the literal `"true"`.
pub fn marker_is_true<S: HintStorage + ?Sized>(storage: &S, scope: Scope, key: &str) -> bool {
    storage.get(scope, key).is_some_and(|v| v.trim() == "true")
}

// =============================================================================
// BROWSER STORAGE
// =============================================================================

/// `localStorage` / `sessionStorage` of the current window.
///
/// Outside the browser every read is empty and writes are ignored, so SSR
/// never sees a hint.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn browser_area(scope: Scope) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match scope {
        Scope::Local => window.local_storage().ok().flatten(),
        Scope::Session => window.session_storage().ok().flatten(),
    }
}

impl HintStorage for BrowserStorage {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            browser_area(scope)?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (scope, key);
            None
        }
    }

    fn set(&self, scope: Scope, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(area) = browser_area(scope) {
                let _ = area.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (scope, key, value);
        }
    }

    fn remove(&self, scope: Scope, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(area) = browser_area(scope) {
                let _ = area.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (scope, key);
        }
    }
}

// =============================================================================
// MEMORY STORAGE
// =============================================================================

/// In-process storage; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<(Scope, String), String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across both scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |map| map.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HintStorage for MemoryStorage {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        let map = self.entries.lock().ok()?;
        map.get(&(scope, key.to_owned())).cloned()
    }

    fn set(&self, scope: Scope, key: &str, value: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert((scope, key.to_owned()), value.to_owned());
        }
    }

    fn remove(&self, scope: Scope, key: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.remove(&(scope, key.to_owned()));
        }
    }
}
