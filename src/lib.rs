//! # pwnthemall-web
//!
//! Browser-facing core of the pwnthemall CTF platform, expressed as a library
//! that runs the same way in a browser shell, a CLI, or a test.
//!
//! ## Session gating
//!
//! [`features::auth::AuthContext`] is the single source of truth for "is the
//! user logged in". It is an explicitly owned handle: the application builds
//! one and passes clones to every page, there is no global.
//!
//! [`features::auth::ProtectedRoute`] is the guard every protected page
//! activates. It triggers one session check, waits for it, and replaces the
//! current history entry with `/login` when the user has no session. Pages
//! render a neutral placeholder while the guard is loading, so protected
//! content never flashes for anonymous users.
//!
//! This is a UX gate only; access control is enforced by the backend API.

pub mod app;
pub mod cli;
pub mod features;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod shared;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
