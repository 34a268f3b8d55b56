//! Guards for multi-step auth flows (password reset, email verification).
//!
//! These steps happen before anyone is logged in, so they check the markers
//! left by the previous step instead of the session.

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

use serde::{Deserialize, Serialize};

use super::decision::{GuardOutcome, RedirectTarget};
use crate::paths;
use crate::session::storage::{
    HintStorage, OTP_VERIFIED_KEY, PENDING_USER_KEY, RESET_EMAIL_KEY, RESET_TOKEN_KEY, Scope, has_marker,
    marker_is_true,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFlowStep {
    /// Enter the OTP emailed by "forgot password".
    VerifyOtp,
    /// Choose a new password after the OTP was accepted.
    NewPassword,
    /// Confirm a freshly registered account.
    VerifyEmail,
}

impl AuthFlowStep {
    /// Where to restart the flow when a marker is missing.
    #[must_use]
    pub fn restart_path(self) -> &'static str {
        match self {
            Self::VerifyOtp | Self::NewPassword => paths::FORGOT_PASSWORD,
            Self::VerifyEmail => paths::REGISTER,
        }
    }
}

/// Allow the step only if the previous step left its markers.
pub fn evaluate_auth_flow<S: HintStorage + ?Sized>(step: AuthFlowStep, storage: &S) -> GuardOutcome {
    let ready = match step {
        AuthFlowStep::VerifyOtp => has_marker(storage, Scope::Local, RESET_EMAIL_KEY),
        AuthFlowStep::NewPassword => {
            has_marker(storage, Scope::Session, RESET_TOKEN_KEY)
                && marker_is_true(storage, Scope::Session, OTP_VERIFIED_KEY)
        }
        AuthFlowStep::VerifyEmail => has_marker(storage, Scope::Local, PENDING_USER_KEY),
    };
    if ready {
        GuardOutcome::Allow
    } else {
        log::debug!("{step:?} markers missing; restarting flow");
        GuardOutcome::Redirect(RedirectTarget::plain(step.restart_path()))
    }
}

/// "Forgot password" accepted `email`; the OTP step may run.
pub fn begin_password_reset<S: HintStorage + ?Sized>(storage: &S, email: &str) {
    storage.set(Scope::Local, RESET_EMAIL_KEY, email);
}

/// Email the reset flow is running for, if any.
pub fn reset_email<S: HintStorage + ?Sized>(storage: &S) -> Option<String> {
    storage.get(Scope::Local, RESET_EMAIL_KEY).filter(|v| !v.trim().is_empty())
}

/// The OTP was accepted; keep the reset token for this tab only.
pub fn record_otp_verified<S: HintStorage + ?Sized>(storage: &S, token: &str) {
    storage.set(Scope::Session, RESET_TOKEN_KEY, token);
    storage.set(Scope::Session, OTP_VERIFIED_KEY, "true");
}

/// Reset token issued by the OTP step, if it is still valid for this tab.
pub fn reset_token<S: HintStorage + ?Sized>(storage: &S) -> Option<String> {
    if !marker_is_true(storage, Scope::Session, OTP_VERIFIED_KEY) {
        return None;
    }
    storage.get(Scope::Session, RESET_TOKEN_KEY).filter(|v| !v.is_empty())
}

/// Clear every marker of the password reset flow once it completes.
pub fn finish_password_reset<S: HintStorage + ?Sized>(storage: &S) {
    storage.remove(Scope::Local, RESET_EMAIL_KEY);
    storage.remove(Scope::Session, RESET_TOKEN_KEY);
    storage.remove(Scope::Session, OTP_VERIFIED_KEY);
}

#[derive(Serialize, Deserialize)]
struct PendingUser {
    #[serde(default)]
    name: String,
    email: String,
}

/// Registration succeeded; the verify-email step may run.
pub fn begin_email_verification<S: HintStorage + ?Sized>(storage: &S, name: &str, email: &str) {
    let pending = PendingUser { name: name.to_owned(), email: email.to_owned() };
    match serde_json::to_string(&pending) {
        Ok(raw) => storage.set(Scope::Local, PENDING_USER_KEY, &raw),
        Err(e) => log::warn!("failed to encode pending user: {e}"),
    }
}

/// Email of the account waiting for verification.
pub fn pending_email<S: HintStorage + ?Sized>(storage: &S) -> Option<String> {
    let raw = storage.get(Scope::Local, PENDING_USER_KEY)?;
    serde_json::from_str::<PendingUser>(&raw).ok().map(|p| p.email).filter(|e| !e.is_empty())
}

pub fn finish_email_verification<S: HintStorage + ?Sized>(storage: &S) {
    storage.remove(Scope::Local, PENDING_USER_KEY);
}
