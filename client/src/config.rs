//! Client-side session configuration.
//!
//! The API base is baked in at compile time (`CAMPFIRE_API_BASE`, default
//! `/api`) so the same bundle works behind the host proxy and in dev. Timing
//! values are fixed; tests construct their own [`SessionConfig`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;
pub const DEFAULT_REVALIDATE_SECS: u64 = 5 * 60;
pub const DEFAULT_TICK_MILLIS: u64 = 1_000;

/// Base path prepended to every backend endpoint.
#[must_use]
pub fn api_base() -> &'static str {
    normalize_base(option_env!("CAMPFIRE_API_BASE").unwrap_or(DEFAULT_API_BASE))
}

fn normalize_base(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { DEFAULT_API_BASE } else { trimmed }
}

/// Timing knobs for the session provider's scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Inactivity after which an authenticated session is logged out.
    pub idle_timeout: Duration,
    /// Interval between background re-validations while authenticated.
    pub revalidate_every: Duration,
    /// Period of the scheduled task.
    pub tick: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            revalidate_every: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            tick: Duration::from_millis(DEFAULT_TICK_MILLIS),
        }
    }
}
