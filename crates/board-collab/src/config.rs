//! Collaborator configuration

use std::time::Duration;

/// Connection settings shared by all collaborator clients
///
/// All four collaborators sit behind the same host and bearer
/// credential.
#[derive(Debug, Clone)]
pub struct CollabConfig {
    /// Base URL of the backend, without trailing slash
    pub base_url: String,
    /// Fixed bearer credential sent with every request
    pub bearer_token: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl CollabConfig {
    /// Settings with the default request timeout
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// With a custom request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
