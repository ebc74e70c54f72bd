use lyra_llm::{RunStatus, TransportError};
use std::time::Duration;
use thiserror::Error;

/// Errors returned by [`crate::session::SessionManager`] send operations.
///
/// Every remote failure comes back as a value; nothing is thrown past the
/// session boundary and nothing aborts the process.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("Message must not be empty")]
    InvalidInput,

    #[error("Transport unavailable: {0}")]
    TransportUnavailable(#[from] TransportError),

    #[error("Assistant run ended with status `{status}`")]
    RunNotCompleted { status: RunStatus },

    #[error("Assistant run {run_id} did not finish within {waited:?}")]
    RunTimeout { run_id: String, waited: Duration },

    #[error("Run completed but no assistant reply was found")]
    EmptyResponse,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Errors from assistant identity resolution.
///
/// `NotFound` is kept distinct from `Transport` so operators can tell a bad
/// assistant id from a connectivity failure.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Assistant `{id}` not found")]
    NotFound { id: String },

    #[error("Transport unavailable: {0}")]
    Transport(#[from] TransportError),
}

/// Errors from the conversation history codec.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Message {message_id} carries unsupported (non-text or multi-segment) content")]
    UnsupportedContent { message_id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
