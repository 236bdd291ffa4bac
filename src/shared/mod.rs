//! Shared client plumbing: configuration, the HTTP client, and the error type
//! every feature client returns.

pub mod api;
pub mod config;
pub mod errors;

pub use api::ApiClient;
pub use config::{AppConfig, Overrides};
pub use errors::AppError;
