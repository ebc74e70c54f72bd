use thiserror::Error;

/// Errors surfaced by the transport layer.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TransportError {
    /// True when the API rejected the request because the addressed resource
    /// does not exist. Lets callers tell "wrong id" from "offline".
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::Api { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
