use thiserror::Error;

/// Errors raised while building an error response
#[derive(Debug, Error)]
pub enum ResponderError {
    /// The payload could not be encoded as JSON
    #[error("failed to encode response body: {0}")]
    Encode(#[from] serde_json::Error),
}
