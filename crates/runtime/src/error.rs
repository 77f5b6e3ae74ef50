use crate::llm::TransportError;
use thiserror::Error;

/// Errors that end a chat round without an assistant reply.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error: {0}")]
    Transport(#[from] TransportError),

    #[error("Error processing response: {0}")]
    ResponseShape(String),
}

impl Error {
    pub(crate) fn shape(err: impl std::fmt::Display) -> Self {
        Self::ResponseShape(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
