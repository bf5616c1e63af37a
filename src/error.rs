//! Error types for the ask skill

use thiserror::Error;

/// Result type alias for skill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while answering a voice request
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential, bad config value)
    #[error("configuration error: {0}")]
    Config(String),

    /// Model listing contained no usable chat model
    #[error("no candidate models matched prefix {prefix:?}")]
    NoCandidates { prefix: String },

    /// A required slot was absent from the intent
    #[error("missing slot: {0}")]
    MissingSlot(String),

    /// Remote API answered with a non-success status
    #[error("remote API returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// Remote API answered successfully but the payload was unusable
    #[error("invalid remote response: {0}")]
    InvalidResponse(String),

    /// HTTP error (connect failure, timeout, body decode)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// HTTP status carried by a remote failure, if any
    #[must_use]
    pub const fn remote_status(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
