use thiserror::Error;

#[derive(Error, Debug)]
pub enum KindsError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for KindsError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        KindsError::Store(err.to_string())
    }
}

impl From<&str> for KindsError {
    fn from(err: &str) -> Self {
        KindsError::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KindsError>;
