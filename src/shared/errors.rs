use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl AppError {
    /// True when the server refused the request because the session is missing
    /// or no longer valid.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: 401 | 403, .. })
    }

    /// Message suitable for a form banner, without the variant prefix.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Config(message)
            | AppError::Network(message)
            | AppError::Timeout(message)
            | AppError::Parse(message)
            | AppError::Serialization(message)
            | AppError::Http { message, .. } => message,
        }
    }
}
