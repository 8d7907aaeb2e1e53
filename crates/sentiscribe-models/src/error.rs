use sentiscribe_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sentiment model error: {0}")]
    Sentiment(String),

    #[error("transcription error: {0}")]
    Transcription(String),

    #[error(transparent)]
    Label(#[from] CoreError),
}
