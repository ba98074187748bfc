//! Error types for the user client.

use thiserror::Error;

/// Errors that can occur when talking to the user API.
#[derive(Error, Debug)]
pub enum UserClientError {
    /// Operation invoked while the client is not in the expected state
    #[error("Illegal client state: {0}")]
    IllegalState(&'static str),

    /// Request could not be completed
    #[error("Request failed: {0}")]
    RequestFailed(#[from] RequestFailure),

    /// Invalid base endpoint URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl UserClientError {
    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed(RequestFailure::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Underlying cause of a [`UserClientError::RequestFailed`].
#[derive(Error, Debug)]
pub enum RequestFailure {
    /// Server could not be reached (connection refused, DNS, timeout)
    #[error("server unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Any other transport-level failure
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RequestFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Unreachable(e)
        } else {
            Self::Transport(e)
        }
    }
}

/// Result type for user client operations.
pub type Result<T> = std::result::Result<T, UserClientError>;
