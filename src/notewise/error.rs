use crate::model::NoteId;
use crate::provider::ProviderError;
use thiserror::Error;

/// Message shown to the user whenever the provider fails in strict mode.
pub const GENERATION_FAILED: &str =
    "Failed to generate summary. Please check your internet connection and try again.";

#[derive(Error, Debug)]
pub enum NotewiseError {
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to generate summary. Please check your internet connection and try again.")]
    Generation {
        #[source]
        source: ProviderError,
    },

    #[error("{0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<ProviderError> for NotewiseError {
    fn from(source: ProviderError) -> Self {
        NotewiseError::Generation { source }
    }
}

pub type Result<T> = std::result::Result<T, NotewiseError>;
