//! REST API helpers for communicating with the backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; the session layer maps any error
//! to "not authenticated" and pages show the error text.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{ActionResponse, FeatureStatus, IdentityResponse, LoginRequest, RegisterRequest, SessionType};

pub const TRAVEL_BUDDY_STATUS_PATH: &str = "/travel-buddy/status";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/password/forgot";
pub const VERIFY_OTP_PATH: &str = "/auth/password/verify-otp";
pub const RESET_PASSWORD_PATH: &str = "/auth/password/reset";
pub const REGISTER_PATH: &str = "/auth/user/register";
pub const VERIFY_EMAIL_PATH: &str = "/auth/user/verify-email";

/// Join the configured API base with an endpoint path.
#[must_use]
pub fn endpoint(path: &str) -> String {
    join_endpoint(crate::config::api_base(), path)
}

fn join_endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[must_use]
pub fn identity_path(kind: SessionType) -> &'static str {
    match kind {
        SessionType::User => "/auth/user/me",
        SessionType::Admin => "/auth/admin/me",
    }
}

#[must_use]
pub fn logout_path(kind: SessionType) -> &'static str {
    match kind {
        SessionType::User => "/auth/user/logout",
        SessionType::Admin => "/auth/admin/logout",
    }
}

#[must_use]
pub fn login_path(kind: SessionType) -> &'static str {
    match kind {
        SessionType::User => "/auth/user/login",
        SessionType::Admin => "/auth/admin/login",
    }
}

/// Turn a form envelope into its payload or a rejection.
fn accept(envelope: ActionResponse, fallback: &str) -> Result<ActionResponse, ApiError> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ApiError::rejected(envelope.message, fallback))
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = endpoint(path);
        let resp = gloo_net::http::Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
        Err(ApiError::Unavailable)
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = endpoint(path);
        let resp = gloo_net::http::Request::post(&url)
            .header("Accept", "application/json")
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body);
        Err(ApiError::Unavailable)
    }
}

async fn post_empty(path: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = endpoint(path);
        let resp = gloo_net::http::Request::post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
        Err(ApiError::Unavailable)
    }
}

// =============================================================================
// SESSION ENDPOINTS
// =============================================================================

/// Ask the backend who is logged in for the given session type.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status, or a
/// malformed body.
pub async fn fetch_identity(kind: SessionType) -> Result<IdentityResponse, ApiError> {
    get_json(identity_path(kind)).await
}

/// End the backend session for the given session type.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure or non-2xx status.
pub async fn logout(kind: SessionType) -> Result<(), ApiError> {
    post_empty(logout_path(kind)).await
}

/// Fetch the Travel Buddy flag for the current user.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status, or a
/// malformed body.
pub async fn fetch_travel_buddy_status() -> Result<FeatureStatus, ApiError> {
    get_json(TRAVEL_BUDDY_STATUS_PATH).await
}

/// Turn Travel Buddy on or off for the current user.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn set_travel_buddy_enabled(enabled: bool) -> Result<FeatureStatus, ApiError> {
    post_json(TRAVEL_BUDDY_STATUS_PATH, &FeatureStatus { enabled }).await
}

// =============================================================================
// FORM ENDPOINTS
// =============================================================================

/// Submit login credentials; returns the raw identity record on success.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the backend rejects the
/// credentials, or the response carries no identity.
pub async fn login(kind: SessionType, request: &LoginRequest) -> Result<serde_json::Value, ApiError> {
    let envelope: ActionResponse = post_json(login_path(kind), request).await?;
    let envelope = accept(envelope, "Invalid email or password.")?;
    envelope
        .user
        .ok_or_else(|| ApiError::Decode("login response missing user".to_owned()))
}

/// Start the password reset flow by emailing an OTP.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn request_password_reset(email: &str) -> Result<(), ApiError> {
    let envelope: ActionResponse = post_json(FORGOT_PASSWORD_PATH, &serde_json::json!({ "email": email })).await?;
    accept(envelope, "Could not send a reset code.").map(|_| ())
}

/// Verify the reset OTP; returns the reset token issued by the backend.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the code is rejected, or no
/// token is returned.
pub async fn verify_reset_otp(email: &str, otp: &str) -> Result<String, ApiError> {
    let envelope: ActionResponse =
        post_json(VERIFY_OTP_PATH, &serde_json::json!({ "email": email, "otp": otp })).await?;
    let envelope = accept(envelope, "Invalid or expired code.")?;
    envelope
        .token
        .ok_or_else(|| ApiError::Decode("verify response missing token".to_owned()))
}

/// Set a new password using a verified reset token.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn reset_password(token: &str, password: &str) -> Result<(), ApiError> {
    let envelope: ActionResponse =
        post_json(RESET_PASSWORD_PATH, &serde_json::json!({ "token": token, "password": password })).await?;
    accept(envelope, "Could not reset password.").map(|_| ())
}

/// Create an account; the backend emails a verification code.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it
/// (for example, the email is already registered).
pub async fn register(request: &RegisterRequest) -> Result<(), ApiError> {
    let envelope: ActionResponse = post_json(REGISTER_PATH, request).await?;
    accept(envelope, "Could not create your account.").map(|_| ())
}

/// Confirm a newly registered account with the emailed code.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn verify_email(email: &str, code: &str) -> Result<(), ApiError> {
    let envelope: ActionResponse =
        post_json(VERIFY_EMAIL_PATH, &serde_json::json!({ "email": email, "code": code })).await?;
    accept(envelope, "Invalid or expired code.").map(|_| ())
}
