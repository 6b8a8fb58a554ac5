//! The remote API the workflow drives
//!
//! Implementations only move bytes: they return the status and body of each
//! response untouched, and leave interpretation to the
//! [`ResponseClassifier`](crate::ResponseClassifier).

use async_trait::async_trait;
use serde::Serialize;

use crate::{ApiResponse, MergeRequest, Result};

/// Body of a create-pull-request call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// PR title
    pub title: String,
    /// PR description
    pub body: String,
    /// Branch containing the changes
    pub head: String,
    /// Branch receiving the changes
    pub base: String,
}

impl NewPullRequest {
    /// The automerger's fixed title/body template for a merge request
    pub fn for_merge(request: &MergeRequest) -> Self {
        Self {
            title: format!("Automerging {} into {}", request.head(), request.base()),
            body: "This pull request was created by the automerger.".to_string(),
            head: request.head().to_string(),
            base: request.base().to_string(),
        }
    }
}

/// Commit message used when merging pull request `number`
pub fn merge_commit_message(number: u64) -> String {
    format!("Automerging pull request #{number} (this was done automatically by the automerger).")
}

/// Pull request endpoints used by the workflow
///
/// An `Err` means no HTTP response was obtained (connection failure,
/// timeout). Every response that did arrive, whatever its status, is `Ok`.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// `POST pulls`
    async fn create_pull(&self, pull: &NewPullRequest) -> Result<ApiResponse>;

    /// `GET pulls?state=open&head=<head>&base=<base>`
    async fn list_open_pulls(&self, base: &str, head: &str) -> Result<ApiResponse>;

    /// `PUT pulls/<number>/merge`
    async fn merge_pull(&self, number: u64, commit_message: &str) -> Result<ApiResponse>;

    /// `PATCH issues/<number>` setting the assignee
    async fn assign_issue(&self, number: u64, assignee: &str) -> Result<ApiResponse>;
}
