//! Collaborator error types
//!
//! Network-side failures only. None of these are fatal: a failed save
//! or promotion leaves local state authoritative and the user retries.

pub use reqwest::StatusCode;

/// Failure talking to an external collaborator
#[derive(Debug, thiserror::Error)]
pub enum CollabError {
    /// Transport-level failure (connect, timeout, body decode)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator answered with a non-success status
    #[error("unexpected status {status} from {endpoint}: {body}")]
    Status {
        /// Endpoint path that was called
        endpoint: String,
        /// HTTP status returned
        status: reqwest::StatusCode,
        /// Response body, for the log line
        body: String,
    },
}

impl CollabError {
    /// Whether this came back as an HTTP status (vs. transport failure)
    #[inline]
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}
