//! Host server configuration parsed from environment variables.
//!
//! Required:
//! - `BACKEND_URL`: base URL of the marketplace API (`/api/*` is forwarded here)
//!
//! Optional:
//! - `PORT`: default 3000
//! - `BACKEND_TIMEOUT_SECS`: default 30
//! - `PROXY_BODY_LIMIT_BYTES`: default 10 MiB

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PROXY_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },
    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend base URL without a trailing slash.
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Build config from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing { var: "BACKEND_URL" })?;
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { var: "BACKEND_URL", value: backend_url });
        }

        Ok(Self {
            port: env_parse(&lookup, "PORT", DEFAULT_PORT)?,
            backend_url,
            backend_timeout: Duration::from_secs(env_parse(
                &lookup,
                "BACKEND_TIMEOUT_SECS",
                DEFAULT_BACKEND_TIMEOUT_SECS,
            )?),
            body_limit: env_parse(&lookup, "PROXY_BODY_LIMIT_BYTES", DEFAULT_PROXY_BODY_LIMIT_BYTES)?,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
/// A set but unparsable value is an error rather than a silent default.
fn env_parse<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
