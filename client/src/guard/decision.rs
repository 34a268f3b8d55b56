//! Render decisions for role-guarded routes.
//!
//! DESIGN
//! ======
//! `evaluate` is a pure function of the current [`Session`]; the component
//! layer only renders its outcome. A role mismatch sends the user to their
//! own home instead of the login page, so a logged-in provider is never
//! bounced to a login form or to the customer home.

#[cfg(test)]
#[path = "decision_test.rs"]
mod decision_test;

use crate::net::types::{ProviderType, Role};
use crate::paths;
use crate::state::session::Session;

/// Where a guard sends the user, optionally remembering where they were.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTarget {
    pub to: String,
    pub from: Option<String>,
}

impl RedirectTarget {
    #[must_use]
    pub fn plain(to: &str) -> Self {
        Self { to: to.to_owned(), from: None }
    }

    /// Redirect that carries `location` for post-login return, unless the
    /// user is already on the target.
    #[must_use]
    pub fn with_return(to: &str, location: &str) -> Self {
        let from = (!location.is_empty() && location != to).then(|| location.to_owned());
        Self { to: to.to_owned(), from }
    }

    /// URL to navigate to, with the return location as a query parameter.
    #[must_use]
    pub fn href(&self) -> String {
        let Some(from) = &self.from else {
            return self.to.clone();
        };
        let encoded: String = url::form_urlencoded::byte_serialize(from.as_bytes()).collect();
        let sep = if self.to.contains('?') { '&' } else { '?' };
        format!("{}{sep}{}={encoded}", self.to, paths::RETURN_PARAM)
    }
}

/// What a guard renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Validation outstanding; show a placeholder, never the children.
    Loading,
    Allow,
    Redirect(RedirectTarget),
}

/// Decide whether `location` may render for `session`.
///
/// An empty `allowed` set admits any authenticated session.
#[must_use]
pub fn evaluate(session: &Session, allowed: &[Role], redirect_to: &str, location: &str) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::Loading;
    }
    let Some(role) = session.role() else {
        return GuardOutcome::Redirect(RedirectTarget::with_return(redirect_to, location));
    };
    if allowed.is_empty() || allowed.contains(&role) {
        return GuardOutcome::Allow;
    }
    log::debug!("role {} not allowed on {location}", role.as_str());
    GuardOutcome::Redirect(RedirectTarget::plain(home_for(session)))
}

/// [`evaluate`] for a provider dashboard: the session must be a service
/// provider of type `required`. Other providers land on their own dashboard.
#[must_use]
pub fn evaluate_provider(session: &Session, required: ProviderType, redirect_to: &str, location: &str) -> GuardOutcome {
    let outcome = evaluate(session, &[Role::ServiceProvider], redirect_to, location);
    if outcome != GuardOutcome::Allow || session.provider_kind() == Some(required) {
        return outcome;
    }
    log::debug!("provider type {:?} not allowed on {location}", session.provider_kind());
    GuardOutcome::Redirect(RedirectTarget::plain(home_for(session)))
}

/// Landing page for the session's role.
#[must_use]
pub fn home_for(session: &Session) -> &'static str {
    match session.role() {
        Some(Role::Admin) => paths::ADMIN_DASHBOARD,
        Some(Role::Customer) => paths::HOME,
        Some(Role::ServiceProvider) => match session.provider_kind() {
            Some(ProviderType::LocalGuide) => paths::LOCAL_GUIDE_HOME,
            Some(ProviderType::EquipmentRenter) => paths::EQUIPMENT_RENTER_HOME,
            None => paths::UNAUTHORIZED,
        },
        None => paths::LOGIN,
    }
}

/// Accept a post-login return location only if it is a same-origin path.
#[must_use]
pub fn sanitize_return_to(raw: Option<&str>) -> Option<String> {
    let candidate = raw?.trim();
    let same_origin = candidate.starts_with('/') && !candidate.starts_with("//") && !candidate.contains('\\');
    let is_entry = [paths::LOGIN, paths::ADMIN_LOGIN]
        .iter()
        .any(|entry| candidate == *entry || candidate.starts_with(&format!("{entry}?")));
    (same_origin && !is_entry).then(|| candidate.to_owned())
}
