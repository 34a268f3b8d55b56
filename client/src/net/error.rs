//! Error taxonomy for backend calls.
//!
//! Every variant is treated as "not authenticated" by the session layer;
//! pages surface `Display` text to the user.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("backend responded with status {0}")]
    Status(u16),
    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
    /// A form endpoint answered `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// Called outside the browser (SSR or native tests).
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Map a `success: false` envelope to an error, with a fallback message.
    #[must_use]
    pub fn rejected(message: Option<String>, fallback: &str) -> Self {
        Self::Rejected(message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| fallback.to_owned()))
    }
}
