//! Settings resolution
//!
//! Every setting is resolved from the command line first, then the
//! environment, then a built-in default.

use crate::error::{Error, Result};
use crate::submit::Pacing;
use std::env;
use std::time::Duration;
use url::Url;

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Environment variable holding the backend base URL
pub const BACKEND_URL_ENV: &str = "LOANFLOW_BACKEND_URL";

/// Environment variable holding an optional request timeout in seconds
pub const TIMEOUT_ENV: &str = "LOANFLOW_TIMEOUT_SECS";

/// Environment variable switching the fixed holds off (`off`) or on (`standard`)
pub const PACING_ENV: &str = "LOANFLOW_PACING";

/// Where a setting value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    /// Command-line flag
    Flag,
    /// Environment variable
    EnvVar,
    /// Built-in default
    Default,
}

/// Resolved client settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend base URL, path always ending in `/`
    pub backend_url: Url,
    /// Where the backend URL was obtained from
    pub backend_source: SettingSource,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Hold times for the pipeline
    pub pacing: Pacing,
}

impl Settings {
    /// Resolve settings against the process environment
    pub fn resolve(backend_flag: Option<&str>, no_pacing: bool) -> Result<Self> {
        Self::resolve_with(backend_flag, no_pacing, |key| env::var(key).ok())
    }

    /// Resolve settings against an arbitrary variable lookup
    ///
    /// Priority for the backend URL:
    /// 1. `--backend` flag
    /// 2. `LOANFLOW_BACKEND_URL`
    /// 3. [`DEFAULT_BACKEND_URL`]
    pub fn resolve_with<F>(backend_flag: Option<&str>, no_pacing: bool, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (raw_url, backend_source) = if let Some(flag) = backend_flag {
            (flag.to_string(), SettingSource::Flag)
        } else if let Some(value) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
            (value, SettingSource::EnvVar)
        } else {
            (DEFAULT_BACKEND_URL.to_string(), SettingSource::Default)
        };

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        let pacing = if no_pacing {
            Pacing::INSTANT
        } else {
            match lookup(PACING_ENV).as_deref().map(str::trim) {
                None | Some("" | "standard" | "on") => Pacing::STANDARD,
                Some("off" | "instant" | "none") => Pacing::INSTANT,
                Some(other) => {
                    return Err(Error::Config(format!(
                        "{PACING_ENV} must be 'standard' or 'off', got '{other}'"
                    )));
                }
            }
        };

        Ok(Self {
            backend_url: parse_backend_url(&raw_url)?,
            backend_source,
            timeout,
            pacing,
        })
    }
}

/// Parse a backend base URL
///
/// Only absolute `http`/`https` URLs are accepted. The path gets a trailing
/// `/` so endpoint paths join below it instead of replacing its last segment.
pub fn parse_backend_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("invalid backend URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "backend URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| {
            Error::Config(format!(
                "{TIMEOUT_ENV} must be a positive number of seconds, got '{raw}'"
            ))
        })
}
