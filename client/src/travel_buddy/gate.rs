//! Travel Buddy access state machine.
//!
//! ```text
//! Checking --role not customer------------> UnauthorizedRole
//!    |   \--not logged in------------------> Unauthenticated
//!    |
//!    +--flag fetch--> enabled   -> Authorized
//!                 \-> disabled  -> FeatureOff (blocking modal)
//!                 \-> error     -> Error (fail closed)
//! ```
//!
//! Role eligibility is checked locally first, so ineligible roles are denied
//! whatever the remote flag says and never trigger a fetch.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::guard::decision::{RedirectTarget, home_for};
use crate::net::error::ApiError;
use crate::net::types::{FeatureStatus, Role};
use crate::paths;
use crate::state::session::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Session or flag still loading.
    Checking,
    Unauthenticated,
    UnauthorizedRole,
    /// Eligible, but the user has not turned Travel Buddy on.
    FeatureOff,
    Authorized,
    /// The flag could not be verified; access is denied.
    Error(String),
}

/// Local role check, before any remote call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Eligibility {
    Pending,
    Eligible,
    Denied(GateState),
}

#[must_use]
pub fn eligibility(session: &Session) -> Eligibility {
    if session.loading {
        return Eligibility::Pending;
    }
    match session.role() {
        None => Eligibility::Denied(GateState::Unauthenticated),
        Some(Role::Customer) => Eligibility::Eligible,
        Some(Role::ServiceProvider | Role::Admin) => Eligibility::Denied(GateState::UnauthorizedRole),
    }
}

/// Map the remote flag answer to a final state.
#[must_use]
pub fn resolve_flag(result: &Result<FeatureStatus, ApiError>) -> GateState {
    match result {
        Ok(FeatureStatus { enabled: true }) => GateState::Authorized,
        Ok(FeatureStatus { enabled: false }) => GateState::FeatureOff,
        Err(e) => {
            log::warn!("travel buddy status check failed: {e}");
            GateState::Error("Unable to verify Travel Buddy access right now.".to_owned())
        }
    }
}

/// Current gate state given the session and the flag answer, if any.
#[must_use]
pub fn gate_state(session: &Session, flag: Option<&Result<FeatureStatus, ApiError>>) -> GateState {
    match eligibility(session) {
        Eligibility::Pending => GateState::Checking,
        Eligibility::Denied(state) => state,
        Eligibility::Eligible => flag.map_or(GateState::Checking, resolve_flag),
    }
}

/// Redirect for states that leave the page instead of rendering.
#[must_use]
pub fn redirect_for(state: &GateState, session: &Session, location: &str) -> Option<RedirectTarget> {
    match state {
        GateState::Unauthenticated => Some(RedirectTarget::with_return(paths::LOGIN, location)),
        GateState::UnauthorizedRole => Some(RedirectTarget::plain(home_for(session))),
        _ => None,
    }
}

/// Buttons of the "feature off" modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalChoice {
    OpenSettings,
    Cancel,
}

impl ModalChoice {
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Self::OpenSettings => paths::SETTINGS,
            Self::Cancel => paths::HOME,
        }
    }
}
