use crate::shared::{ApiClient, AppConfig, AppError, Overrides};
use secrecy::SecretString;
use std::time::Duration;

/// Connection settings shared by every subcommand.
#[derive(Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_cookie: Option<SecretString>,
    pub timeout_seconds: u64,
    pub login_path: Option<String>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            session_cookie: None,
            timeout_seconds: 0,
            login_path: None,
        }
    }

    pub fn set_session_cookie(&mut self, cookie: SecretString) {
        self.session_cookie = Some(cookie);
    }

    /// Layers the command-line values over the build-time configuration.
    #[must_use]
    pub fn config(&self) -> AppConfig {
        AppConfig::load().with_overrides(Overrides {
            api_base_url: Some(self.api_url.clone()),
            login_path: self.login_path.clone(),
            request_timeout: Some(Duration::from_secs(self.timeout_seconds)),
        })
    }

    /// Builds the API client carrying the session cookie, if any.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the API URL is unusable.
    pub fn api_client(&self) -> Result<ApiClient, AppError> {
        ApiClient::new(&self.config(), self.session_cookie.as_ref())
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("api_url", &self.api_url)
            .field("session_cookie", &self.session_cookie.as_ref().map(|_| "***"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("login_path", &self.login_path)
            .finish()
    }
}
