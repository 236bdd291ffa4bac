//! HTTP helpers for the pwnthemall JSON API with a consistent timeout and error
//! policy. Feature clients go through [`ApiClient`] instead of building requests
//! themselves. The session cookie is placed in the client's cookie jar and is
//! never logged.

use super::{config::AppConfig, errors::AppError};
use crate::APP_USER_AGENT;
use reqwest::{cookie::Jar, Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Cookie-aware JSON client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client for `config`, seeding the cookie jar with `session_cookie`
    /// (`name=value`) when one is given.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &AppConfig, session_cookie: Option<&SecretString>) -> Result<Self, AppError> {
        let base_url = config.api_url()?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = session_cookie {
            jar.add_cookie_str(cookie.expose_secret(), &base_url);
        }

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_provider(jar)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches JSON and returns `None` on 204, 401 or 403.
    ///
    /// # Errors
    /// Returns transport, HTTP or decoding errors.
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, AppError> {
        let url = build_url_with_base(self.base_url.as_str(), path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_optional_json_response(response).await
    }

    /// Posts JSON and expects any successful status; the body is ignored.
    ///
    /// # Errors
    /// Returns transport or HTTP errors.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let url = build_url_with_base(self.base_url.as_str(), path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }

    /// Posts an empty body, used to clear a session.
    ///
    /// # Errors
    /// Returns transport or HTTP errors.
    pub async fn post_empty(&self, path: &str) -> Result<(), AppError> {
        let url = build_url_with_base(self.base_url.as_str(), path);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps reqwest errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

/// Parses optional JSON responses and treats 204/401/403 as no session.
async fn handle_optional_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, AppError> {
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")));
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        debug!(status = status.as_u16(), "no session");
        return Ok(None);
    }

    Err(http_error(response).await)
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: sanitize_body(&body),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages. The backend answers
/// `{"error": "..."}`; that message is preferred over the raw body.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "Request failed.".to_string();
    }

    let message = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| trimmed.to_string());

    message.chars().take(MAX_ERROR_CHARS).collect()
}
