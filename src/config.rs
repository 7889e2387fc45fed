//! Client configuration parsed from environment variables.
//!
//! `main` loads a `.env` file first (if present), then builds
//! [`ClientConfig::from_env`] and lets command-line flags override it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UI_DELAY_MS: u64 = 0;
const TOKEN_DIR: &str = ".foodbites";
const TOKEN_FILE: &str = "session.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} (expected {expected})")]
    Invalid { var: &'static str, value: String, expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub connect: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without the `/api` suffix, e.g. `http://localhost:5000`.
    pub api_url: String,
    pub token_file: PathBuf,
    pub timeouts: Timeouts,
    /// Cosmetic pause before menu loads and cart adds land.
    pub ui_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            token_file: default_token_file(std::env::var_os("HOME").map(PathBuf::from)),
            timeouts: Timeouts {
                request: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            ui_delay: Duration::from_millis(DEFAULT_UI_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `FOODBITES_API_URL`: backend origin, default `http://localhost:5000`
    /// - `FOODBITES_TOKEN_FILE`: default `$HOME/.foodbites/session.json`
    /// - `FOODBITES_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FOODBITES_CONNECT_TIMEOUT_SECS`: default 10
    /// - `FOODBITES_UI_DELAY_MS`: default 0
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here;
    /// tests pass a map so they never touch the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("FOODBITES_API_URL")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.api_url, |v| normalize_api_url(&v));
        let token_file = lookup("FOODBITES_TOKEN_FILE")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.token_file, PathBuf::from);

        let request = parse_u64(&lookup, "FOODBITES_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let connect = parse_u64(&lookup, "FOODBITES_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let ui_delay_ms = parse_u64(&lookup, "FOODBITES_UI_DELAY_MS", DEFAULT_UI_DELAY_MS)?;

        Ok(Self {
            api_url,
            token_file,
            timeouts: Timeouts { request: Duration::from_secs(request), connect: Duration::from_secs(connect) },
            ui_delay: Duration::from_millis(ui_delay_ms),
        })
    }
}

/// Trim whitespace and trailing slashes, and drop a trailing `/api` so the
/// origin can be used for both API calls and image URLs.
#[must_use]
pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .to_owned()
}

fn default_token_file(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_default().join(TOKEN_DIR).join(TOKEN_FILE)
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { var, value: raw, expected: "a non-negative integer" }),
    }
}
