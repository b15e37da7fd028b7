use thiserror::Error;

pub type Result<T> = std::result::Result<T, MockupError>;

#[derive(Debug, Clone, Error)]
pub enum MockupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Render rejected: {0}")]
    Rejected(String),

    #[error("Render response does not contain an export path")]
    MissingExportPath,
}

impl From<reqwest::Error> for MockupError {
    fn from(err: reqwest::Error) -> Self {
        MockupError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for MockupError {
    fn from(err: serde_json::Error) -> Self {
        MockupError::Parse(err.to_string())
    }
}
