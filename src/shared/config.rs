//! Client configuration: where the pwnthemall API lives, where anonymous users
//! are sent, and how long a request may take. A build-time default can be baked
//! in with `PWNTHEMALL_API_BASE_URL`; the CLI overrides it at runtime.
//! Configuration values are public; the session cookie is handled separately.

use super::errors::AppError;
use crate::routes::paths;
use std::time::Duration;
use url::Url;

/// API base used when nothing else is configured (the Next.js dev server).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
/// Default request timeout applied to every API call.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Frontend configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub login_path: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_path: paths::LOGIN.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl AppConfig {
    /// Loads the build-time configuration.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(value) = option_env!("PWNTHEMALL_API_BASE_URL").and_then(normalize_value) {
            config.api_base_url = value;
        }
        config
    }

    /// Applies runtime overrides, ignoring empty values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        apply_overrides(&mut self, overrides);
        self
    }

    /// Parses the API base URL, rejecting anything that is not absolute http(s).
    ///
    /// # Errors
    /// Returns `AppError::Config` when the URL is empty, malformed or uses another scheme.
    pub fn api_url(&self) -> Result<Url, AppError> {
        let url = Url::parse(self.api_base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AppError::Config(format!(
                "Unsupported API URL scheme: {scheme}"
            ))),
        }
    }
}

/// Runtime values that replace the build-time defaults when present.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub login_path: Option<String>,
    pub request_timeout: Option<Duration>,
}

fn apply_overrides(config: &mut AppConfig, overrides: Overrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
        config.api_base_url = value;
    }
    if let Some(value) = overrides.login_path.as_deref().and_then(normalize_value) {
        config.login_path = value;
    }
    if let Some(timeout) = overrides.request_timeout.filter(|t| !t.is_zero()) {
        config.request_timeout = timeout;
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
