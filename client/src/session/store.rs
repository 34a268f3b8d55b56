//! Session store: turns persisted hints into a validated [`Session`].
//!
//! ARCHITECTURE
//! ============
//! The store is framework-agnostic. The Leptos provider owns one instance and
//! copies each [`Validation::Current`] result into its signal; guards never
//! talk to the backend or storage for session state themselves.
//!
//! ```text
//! hints? --no--> signed out (no request)
//!   |
//!  yes --> whoami(admin?) --> whoami(user?) --> first authenticated wins
//!                                           \--> none: clear hints, signed out
//! ```
//!
//! ORDERING
//! ========
//! Every validation runs under a generation number. `logout`, `sign_in`, and
//! newer validations bump the generation, so a slow response that resolves
//! after them is reported as [`Validation::Stale`] and changes nothing.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::backend::SessionBackend;
use super::storage::{self, HintStorage, Scope};
use crate::net::error::ApiError;
use crate::net::types::{AdminRecord, SessionType, UserRecord};
use crate::paths;
use crate::state::session::Session;

/// Outcome of one validation round-trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validation {
    /// The result is the latest word on the session; apply it.
    Current(Session),
    /// A newer validation, login, or logout superseded this one; drop it.
    Stale,
}

/// Why a hinted session type did not validate.
enum Rejected {
    NotAuthenticated,
    Failed(ApiError),
}

/// Validates, establishes, and ends sessions against a backend and storage.
#[derive(Clone, Debug)]
pub struct SessionStore<B, S> {
    backend: B,
    storage: S,
    generation: Arc<AtomicU64>,
}

impl<B, S> SessionStore<B, S>
where
    B: SessionBackend,
    S: HintStorage,
{
    #[must_use]
    pub fn new(backend: B, storage: S) -> Self {
        Self { backend, storage, generation: Arc::new(AtomicU64::new(0)) }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Claim a new generation, superseding every in-flight validation.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Validate under a fresh generation.
    pub async fn validate(&self) -> Validation {
        let generation = self.next_generation();
        self.validate_generation(generation).await
    }

    /// Validate under a generation obtained from [`Self::next_generation`].
    ///
    /// Fails closed: any backend error, non-2xx status, malformed body, or
    /// `authenticated: false` counts as not logged in.
    pub async fn validate_generation(&self, generation: u64) -> Validation {
        let hints = storage::read_hints(&self.storage);
        if !hints.any() {
            log::debug!("no session hint; skipping validation");
            return Validation::Current(Session::signed_out(None));
        }

        let mut failed = Vec::new();
        let mut last_error = None;
        for kind in [SessionType::Admin, SessionType::User] {
            if !hints.has(kind) {
                continue;
            }
            let outcome = self.check(kind).await;
            if !self.is_current(generation) {
                log::debug!("dropping stale {kind:?} validation (generation {generation})");
                return Validation::Stale;
            }
            match outcome {
                Ok(session) => {
                    for stale_kind in failed {
                        self.storage.remove(Scope::Local, storage::hint_key(stale_kind));
                    }
                    self.refresh_hint(&session);
                    log::debug!("validated {kind:?} session");
                    return Validation::Current(session);
                }
                Err(Rejected::NotAuthenticated) => {
                    log::info!("{kind:?} session no longer valid");
                    failed.push(kind);
                }
                Err(Rejected::Failed(e)) => {
                    log::warn!("{kind:?} session validation failed: {e}");
                    last_error = Some(e.to_string());
                    failed.push(kind);
                }
            }
        }

        storage::clear_session_hints(&self.storage);
        Validation::Current(Session::signed_out(last_error))
    }

    async fn check(&self, kind: SessionType) -> Result<Session, Rejected> {
        let resp = self.backend.fetch_identity(kind).await.map_err(Rejected::Failed)?;
        if !resp.authenticated {
            return Err(Rejected::NotAuthenticated);
        }
        let raw = resp
            .user
            .ok_or_else(|| Rejected::Failed(ApiError::Decode("identity response missing user".to_owned())))?;
        decode_session(kind, raw).map_err(Rejected::Failed)
    }

    fn refresh_hint(&self, session: &Session) {
        if let Some(user) = &session.user {
            storage::write_hint(&self.storage, SessionType::User, user);
        }
        if let Some(admin) = &session.admin {
            storage::write_hint(&self.storage, SessionType::Admin, admin);
        }
    }

    /// Record a successful login and return the resulting session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `raw` is not a valid record for `kind`;
    /// storage is left untouched in that case.
    pub fn sign_in(&self, kind: SessionType, raw: serde_json::Value) -> Result<Session, ApiError> {
        let session = decode_session(kind, raw)?;
        self.next_generation();
        let other = match kind {
            SessionType::User => SessionType::Admin,
            SessionType::Admin => SessionType::User,
        };
        self.storage.remove(Scope::Local, storage::hint_key(other));
        self.refresh_hint(&session);
        log::info!("signed in as {kind:?}");
        Ok(session)
    }

    /// End the session and return the entry page to navigate to.
    ///
    /// The backend call is best-effort; local state is cleared regardless.
    pub async fn logout(&self, active: Option<SessionType>) -> &'static str {
        self.next_generation();
        if let Some(kind) = active {
            if let Err(e) = self.backend.logout(kind).await {
                log::warn!("backend logout failed for {kind:?}: {e}");
            }
        }
        storage::clear_all(&self.storage);
        log::info!("logged out ({active:?})");
        entry_path(active)
    }
}

/// Login page for the session type that was active.
#[must_use]
pub fn entry_path(active: Option<SessionType>) -> &'static str {
    match active {
        Some(SessionType::Admin) => paths::ADMIN_LOGIN,
        Some(SessionType::User) | None => paths::LOGIN,
    }
}

fn decode_session(kind: SessionType, raw: serde_json::Value) -> Result<Session, ApiError> {
    let decoded = match kind {
        SessionType::User => serde_json::from_value::<UserRecord>(raw).map(Session::for_user),
        SessionType::Admin => serde_json::from_value::<AdminRecord>(raw).map(Session::for_admin),
    };
    decoded.map_err(|e| ApiError::Decode(e.to_string()))
}
