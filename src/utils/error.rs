// src/utils/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KycError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Verification error: {0}")]
    Verification(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Transition error: {0}")]
    Transition(String),

    #[error("Submission error: {0}")]
    Submission(String),
}

pub type Result<T> = std::result::Result<T, KycError>;

impl From<reqwest::Error> for KycError {
    fn from(error: reqwest::Error) -> Self {
        KycError::Backend(error.to_string())
    }
}
