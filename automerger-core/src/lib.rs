//! Automerger Core - merge one branch into another through a pull request
//!
//! This crate holds the decision logic: the pull request operations, the
//! classification of their responses into [`Outcome`]s, and the workflow
//! that turns those outcomes into a final [`Resolution`]. The HTTP side
//! lives behind the [`PullRequestApi`] trait.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod outcome;
pub mod proposal;
pub mod request;
pub mod workflow;

pub use api::{merge_commit_message, NewPullRequest, PullRequestApi};
pub use classify::{
    GitHubClassifier, ResponseClassifier, NO_COMMITS_BETWEEN, PULL_REQUEST_ALREADY_EXISTS,
};
pub use config::{CliOverrides, Config, GitHubConfig, WorkflowConfig};
pub use error::{Error, Result};
pub use outcome::{ApiResponse, ApiStatus, Outcome, Unexpected, UnexpectedKind};
pub use proposal::{assign_proposal, create_proposal, locate_proposal, merge_proposal};
pub use request::{normalize_assignee, MergeRequest};
pub use workflow::{
    MergePhase, MergeWorkflow, NoProgress, Progress, ProgressHandler, ProposalOrigin, Resolution,
    TerminalStatus,
};
