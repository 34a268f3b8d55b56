//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards, the Travel Buddy gate, and user-aware components to
//! coordinate login redirects and identity-dependent rendering. Only the
//! session store produces authenticated values, always from a backend
//! response.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{AdminRecord, ProviderType, Role, SessionType, UserRecord};

/// Who is logged in, as of the latest validation round-trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<UserRecord>,
    pub admin: Option<AdminRecord>,
    pub session_type: Option<SessionType>,
    /// A validation is outstanding and nothing has been decided yet.
    pub loading: bool,
    pub error: Option<String>,
}

/// Starts in the loading state so SSR and first paint never redirect.
impl Default for Session {
    fn default() -> Self {
        Self {
            authenticated: false,
            user: None,
            admin: None,
            session_type: None,
            loading: true,
            error: None,
        }
    }
}

impl Session {
    /// Settled, unauthenticated session.
    #[must_use]
    pub fn signed_out(error: Option<String>) -> Self {
        Self { loading: false, error, ..Self::default() }
    }

    #[must_use]
    pub fn for_user(user: UserRecord) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
            admin: None,
            session_type: Some(SessionType::User),
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub fn for_admin(admin: AdminRecord) -> Self {
        Self {
            authenticated: true,
            user: None,
            admin: Some(admin),
            session_type: Some(SessionType::Admin),
            loading: false,
            error: None,
        }
    }

    /// Effective role, or `None` when not authenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        if !self.authenticated {
            return None;
        }
        match self.session_type? {
            SessionType::Admin => self.admin.as_ref().map(|_| Role::Admin),
            SessionType::User => self.user.as_ref().map(|u| u.role),
        }
    }

    #[must_use]
    pub fn provider_kind(&self) -> Option<ProviderType> {
        if !self.authenticated {
            return None;
        }
        self.user.as_ref().and_then(UserRecord::provider_kind)
    }

    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let name = match self.session_type? {
            SessionType::User => self.user.as_ref()?.name.as_str(),
            SessionType::Admin => self.admin.as_ref()?.name.as_str(),
        };
        (!name.is_empty()).then_some(name)
    }
}
