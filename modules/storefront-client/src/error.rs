use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorefrontError>;

#[derive(Debug, Clone, Error)]
pub enum StorefrontError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// The backend refused the bearer token (401/403). The caller must log in again.
    #[error("Session expired (status {status})")]
    SessionExpired { status: u16 },
}

impl From<reqwest::Error> for StorefrontError {
    fn from(err: reqwest::Error) -> Self {
        StorefrontError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        StorefrontError::Parse(err.to_string())
    }
}
