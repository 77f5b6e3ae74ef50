use thiserror::Error;

/// Errors from the HTTP call to the model provider.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request never produced a response.
    #[error("API request failed: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("API request failed: {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not JSON.
    #[error("API request failed: invalid response body: {0}")]
    Decode(String),
}
