use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid media: {0}")]
    InvalidMedia(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
