//! Auth feature: session state, the protected-route guard, and the client for
//! the backend's session endpoints. This module touches security boundaries
//! and must avoid logging credentials or cookie material.
//!
//! Flow Overview: a protected page activates [`ProtectedRoute`], which asks the
//! shared [`AuthContext`] to check the session. The context calls `/api/me`
//! once, commits `{logged_in, auth_checked}` in one step, and wakes every
//! guard. Guards render content when authorized and replace the current
//! history entry with `/login` otherwise.

pub mod client;
mod guards;
pub mod state;
pub mod types;

pub use client::{AuthApi, HttpAuthApi};
pub use guards::{ProtectedRoute, RouteStatus};
pub use state::{AuthContext, AuthState};
pub use types::{LoginRequest, UserSession};
