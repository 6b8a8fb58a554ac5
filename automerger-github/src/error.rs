//! Error types for GitHub client setup

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a GitHub client
///
/// Request-time failures are reported through the core crate's
/// [`PullRequestApi`](automerger_core::PullRequestApi) contract instead.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error from the core crate (configuration)
    #[error(transparent)]
    Core(#[from] automerger_core::Error),
}
