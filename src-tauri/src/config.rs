use std::env;
use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::error::FlowdeskError;

pub const DEFAULT_API_URL: &str = "https://flowdesk-production.up.railway.app/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_URL_VAR: &str = "FLOWDESK_API_URL";
const TIMEOUT_VAR: &str = "FLOWDESK_HTTP_TIMEOUT_SECS";

/// Where the analytics backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FlowdeskError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout,
        })
    }

    /// Load from `FLOWDESK_API_URL` and `FLOWDESK_HTTP_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, FlowdeskError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, FlowdeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                info!("{API_URL_VAR} not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            });

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                warn!("Invalid {TIMEOUT_VAR} value '{raw}': {e}");
                FlowdeskError::Config(format!("Invalid {TIMEOUT_VAR} value '{raw}': {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }

    /// Replace the base URL, e.g. with the `api_base_url` preference.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, FlowdeskError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..self
        })
    }

    /// Resolve an endpoint such as `upload/` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, FlowdeskError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FlowdeskError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }
}

/// Parse and normalize a base URL so it always ends with a slash.
/// `Url::join` would otherwise drop the last path segment (`/api`).
fn parse_base_url(raw: &str) -> Result<Url, FlowdeskError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| FlowdeskError::Config(format!("Invalid API URL '{}': {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FlowdeskError::Config(format!(
            "Unsupported API URL scheme '{}'",
            other
        ))),
    }
}
