use thiserror::Error;

#[derive(Error, Debug)]
pub enum FashionAiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown product type: {0}")]
    UnknownProductType(String),
}
