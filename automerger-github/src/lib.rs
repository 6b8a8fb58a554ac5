//! Automerger GitHub - GitHub REST integration for the automerger
//!
//! Implements [`automerger_core::PullRequestApi`] over the GitHub v3 REST
//! API with reqwest. Responses are passed back verbatim; classification
//! happens in the core crate.

mod client;
mod error;
mod pulls;

pub use client::GitHubClient;
pub use error::{Error, Result};
