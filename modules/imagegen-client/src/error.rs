use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

#[derive(Debug, Clone, Error)]
pub enum ImageGenError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Worker returned an empty image")]
    EmptyImage,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ImageGenError {
    fn from(err: reqwest::Error) -> Self {
        ImageGenError::Network(err.to_string())
    }
}
