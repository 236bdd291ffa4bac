//! Request and response types for the auth endpoints. Login payloads carry the
//! user's password, so they must never be logged.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// `/api/me` payload. Only its presence matters for gating; the fields are
/// kept for display.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub member_since: Option<String>,
}

impl UserSession {
    #[must_use]
    pub fn has_team(&self) -> bool {
        self.team_id.is_some()
    }
}
