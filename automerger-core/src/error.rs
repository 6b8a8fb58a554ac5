//! Error types for the automerger

use thiserror::Error;

/// Result type alias for automerger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for automerger operations
///
/// Remote responses never end up here: they are classified into an
/// [`Outcome`](crate::Outcome). These errors cover local setup, the
/// transport underneath the API, and workflow bookkeeping.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command line input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The request never produced an HTTP response (connect failure, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Illegal workflow phase transition
    #[error("Workflow error: {0}")]
    Workflow(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
