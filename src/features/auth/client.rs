//! Auth collaborator. [`AuthApi`] is the seam the session state depends on;
//! [`HttpAuthApi`] talks to the pwnthemall backend through the Next.js API
//! routes, which forward the session cookie to the Go service.

use crate::shared::{ApiClient, AppError};
use crate::features::auth::types::{LoginRequest, UserSession};
use async_trait::async_trait;
use tracing::instrument;

pub const SESSION_PATH: &str = "/api/me";
pub const LOGIN_PATH: &str = "/api/login";
pub const LOGOUT_PATH: &str = "/api/logout";

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Validates the ambient session. `Ok(None)` means there is none.
    ///
    /// # Errors
    /// Returns an [`AppError`] when the request itself fails.
    async fn fetch_session(&self) -> Result<Option<UserSession>, AppError>;

    /// Submits credentials; on success the server sets the session cookie.
    ///
    /// # Errors
    /// Returns an [`AppError`] for rejected credentials or transport failures.
    async fn login(&self, request: &LoginRequest) -> Result<(), AppError>;

    /// Clears the session on the server.
    ///
    /// # Errors
    /// Returns an [`AppError`] when the request fails.
    async fn logout(&self) -> Result<(), AppError>;
}

#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip_all)]
    async fn fetch_session(&self) -> Result<Option<UserSession>, AppError> {
        self.client.get_optional_json(SESSION_PATH).await
    }

    #[instrument(skip_all, fields(identifier = %request.identifier))]
    async fn login(&self, request: &LoginRequest) -> Result<(), AppError> {
        self.client.post_json(LOGIN_PATH, request).await
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), AppError> {
        self.client.post_empty(LOGOUT_PATH).await
    }
}
