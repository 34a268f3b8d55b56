//! Input validation shared by the auth pages.
//!
//! Validators trim input and return the message shown under the form on
//! failure. The backend re-validates everything.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::guard::decision::{home_for, sanitize_return_to};
use crate::net::error::ApiError;
use crate::net::types::{LoginRequest, ProviderType, RegisterRequest, Role};
use crate::state::session::Session;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const OTP_LEN: usize = 6;

/// Trimmed email, if it looks like one.
pub fn validate_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if email.is_empty() {
        return Err("Enter your email.");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            Ok(email.to_owned())
        }
        _ => Err("Enter a valid email address."),
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok(LoginRequest { email, password: password.to_owned() })
}

/// Six-digit code from the reset or verification email.
pub fn validate_otp(raw: &str) -> Result<String, &'static str> {
    let code = raw.trim();
    if code.len() == OTP_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code.to_owned())
    } else {
        Err("Enter the 6-digit code from your email.")
    }
}

pub fn validate_new_password(password: &str, confirm: &str) -> Result<String, &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(password.to_owned())
}

/// Registration form fields as typed.
#[derive(Clone, Debug, Default)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub as_provider: bool,
    pub provider_type: Option<ProviderType>,
}

pub fn validate_registration(input: &RegistrationInput) -> Result<RegisterRequest, &'static str> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err("Enter your name.");
    }
    let email = validate_email(&input.email)?;
    let password = validate_new_password(&input.password, &input.confirm)?;
    let (role, provider_type) = if input.as_provider {
        let kind = input.provider_type.ok_or("Choose what kind of provider you are.")?;
        (Role::ServiceProvider, Some(kind.as_str().to_owned()))
    } else {
        (Role::Customer, None)
    };
    Ok(RegisterRequest { name: name.to_owned(), email, password, role, provider_type })
}

/// Where to go after a successful login: the sanitized `from` parameter,
/// or the session's home page.
pub fn post_login_target(session: &Session, from: Option<&str>) -> String {
    sanitize_return_to(from).unwrap_or_else(|| home_for(session).to_owned())
}

/// Where a login page should send a session that is already signed in, or
/// `None` while it is loading or signed out.
pub fn signed_in_redirect(session: &Session, from: Option<&str>) -> Option<String> {
    (!session.loading && session.authenticated).then(|| post_login_target(session, from))
}

/// Message shown under a form when a backend call fails.
pub fn describe_error(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Rejected(message) => message.clone(),
        ApiError::Network(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
        ApiError::Status(401 | 403) => fallback.to_owned(),
        ApiError::Status(_) | ApiError::Decode(_) | ApiError::Unavailable => {
            log::warn!("form request failed: {err}");
            "Something went wrong. Please try again.".to_owned()
        }
    }
}
