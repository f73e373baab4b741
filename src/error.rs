//! Error types for gitflow-action

use thiserror::Error;

/// Errors that can end a run
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid action inputs
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// Missing or malformed event payload
    #[error("event error: {0}")]
    Event(String),

    /// GitHub API call failed (transport, authorization, bad response)
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform failure
    #[error("platform error: {0}")]
    Platform(String),

    /// A merge attempt failed and the run requires merges to succeed.
    ///
    /// The message is fixed; the platform's reason is only logged at debug level.
    #[error("Merge failed.")]
    MergeFailed,
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result alias for gitflow-action
pub type Result<T> = std::result::Result<T, Error>;
