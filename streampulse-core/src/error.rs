use streampulse_model::{ModelError, MovieID, SubscriberID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Movie not found: {0}")]
    MovieNotFound(MovieID),

    #[error("Movie already in catalog: {0}")]
    DuplicateMovie(MovieID),

    #[error("Subscriber not found: {0}")]
    SubscriberNotFound(SubscriberID),

    #[error("Ad zone not found: {0}")]
    AdZoneNotFound(String),

    #[error("Email template not found: {0}")]
    TemplateNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
