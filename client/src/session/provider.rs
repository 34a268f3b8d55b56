//! Session context provided at the app root.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the single subscription point for "who is logged in". Guards and
//! pages read `state`; only this module writes it. One timer loop drives
//! idle logout and periodic re-validation, and it is torn down with the
//! owning component.
//!
//! Browser-only work (validation, timers, listeners, navigation) is compiled
//! for `hydrate`. Under SSR the context stays in its initial loading state.

use leptos::prelude::*;

use super::backend::{HttpBackend, SessionBackend};
use super::schedule::{SessionSchedule, now_ms};
use super::storage::BrowserStorage;
use super::store::{SessionStore, Validation};
use crate::config::SessionConfig;
use crate::net::error::ApiError;
use crate::net::types::{FeatureStatus, SessionType};
use crate::state::session::Session;

/// Store wired to the real backend and browser storage.
pub type BrowserSessionStore = SessionStore<HttpBackend, BrowserStorage>;

/// Reactive handle to the current session.
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Latest validated session. Read-only outside this module by convention.
    pub state: RwSignal<Session>,
    store: StoredValue<BrowserSessionStore>,
    schedule: StoredValue<SessionSchedule>,
    config: SessionConfig,
}

impl SessionContext {
    fn new(config: SessionConfig) -> Self {
        Self {
            state: RwSignal::new(Session::default()),
            store: StoredValue::new(SessionStore::new(HttpBackend, BrowserStorage)),
            schedule: StoredValue::new(SessionSchedule::new(&config, now_ms())),
            config,
        }
    }

    /// Re-validate against the backend in the background.
    pub fn refresh(&self) {
        #[cfg(feature = "hydrate")]
        {
            let ctx = *self;
            leptos::task::spawn_local(async move { ctx.run_validation().await });
        }
    }

    /// Run one validation and apply it unless something newer happened.
    pub async fn run_validation(self) {
        let store = self.store.get_value();
        let generation = store.next_generation();
        match store.validate_generation(generation).await {
            Validation::Current(session) if store.is_current(generation) => self.apply(session),
            Validation::Current(_) | Validation::Stale => log::debug!("validation superseded"),
        }
    }

    fn apply(&self, session: Session) {
        self.schedule.update_value(|s| s.mark_validated(now_ms()));
        self.state.set(session);
    }

    /// Record a successful login form submission.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the backend's record does not match
    /// `kind`; the session is left unchanged.
    pub fn sign_in(&self, kind: SessionType, raw: serde_json::Value) -> Result<(), ApiError> {
        let session = self.store.with_value(|store| store.sign_in(kind, raw))?;
        self.schedule.update_value(|s| s.reset(now_ms()));
        self.state.set(session);
        Ok(())
    }

    /// End the session, clear local hints, and leave for the entry page.
    pub fn logout(&self) {
        let ctx = *self;
        let active = self.state.get_untracked().session_type;
        let store = self.store.get_value();
        leptos::task::spawn_local(async move {
            let target = store.logout(active).await;
            ctx.state.set(Session::signed_out(None));
            hard_navigate(target);
        });
    }

    /// User input seen.
    pub fn record_activity(&self) {
        self.schedule.update_value(|s| s.record_activity(now_ms()));
    }

    /// Remote Travel Buddy flag for the logged-in user.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`ApiError`].
    pub async fn travel_buddy_status(&self) -> Result<FeatureStatus, ApiError> {
        let store = self.store.get_value();
        store.backend().travel_buddy_status().await
    }
}

/// Full page load to `path`, dropping all in-memory state.
pub fn hard_navigate(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}

/// Create the session context, provide it, and start background work.
pub fn provide_session(config: SessionConfig) -> SessionContext {
    let ctx = SessionContext::new(config);
    provide_context(ctx);
    #[cfg(feature = "hydrate")]
    start_background(ctx);
    ctx
}

/// The session context provided by [`provide_session`].
///
/// # Panics
///
/// Panics if called outside the app root's provider.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(feature = "hydrate")]
fn start_background(ctx: SessionContext) {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::schedule::Tick;

    ctx.refresh();

    let alive = Arc::new(AtomicBool::new(true));
    let alive_task = alive.clone();
    let period = ctx.config.tick;
    leptos::task::spawn_local(async move {
        loop {
            gloo_timers::future::sleep(period).await;
            if !alive_task.load(Ordering::Relaxed) {
                break;
            }
            let Some(current) = ctx.state.try_get_untracked() else {
                break;
            };
            let action = ctx
                .schedule
                .try_update_value(|s| s.tick(now_ms(), current.authenticated));
            match action {
                Some(Tick::IdleLogout) => {
                    log::info!("idle timeout reached; logging out");
                    ctx.logout();
                }
                Some(Tick::Revalidate) => ctx.run_validation().await,
                Some(Tick::Nothing) | None => {}
            }
        }
    });

    let handles = vec![
        window_event_listener(leptos::ev::mousemove, move |_| ctx.record_activity()),
        window_event_listener(leptos::ev::keydown, move |_| ctx.record_activity()),
        window_event_listener(leptos::ev::click, move |_| ctx.record_activity()),
        window_event_listener(leptos::ev::scroll, move |_| ctx.record_activity()),
        window_event_listener(leptos::ev::touchstart, move |_| ctx.record_activity()),
    ];

    on_cleanup(move || {
        alive.store(false, Ordering::Relaxed);
        for handle in handles {
            handle.remove();
        }
    });
}
