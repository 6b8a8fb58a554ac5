//! The four pull request operations
//!
//! Each issues one request and reduces the response to an [`Outcome`].
//! Nothing is retried.

use tracing::{debug, warn};

use crate::api::{merge_commit_message, NewPullRequest, PullRequestApi};
use crate::{MergeRequest, Outcome, ResponseClassifier, Unexpected};

/// Open a pull request for `request`
///
/// Returns `Created`, `AlreadyExists`, `NothingToMerge` or `UnexpectedError`.
pub async fn create_proposal(
    api: &dyn PullRequestApi,
    classifier: &dyn ResponseClassifier,
    request: &MergeRequest,
) -> Outcome {
    let pull = NewPullRequest::for_merge(request);
    debug!(base = request.base(), head = request.head(), "Creating pull request");

    let outcome = match api.create_pull(&pull).await {
        Ok(response) => classifier.classify_create(&response),
        Err(e) => Outcome::UnexpectedError(Unexpected::transport(e.to_string())),
    };
    log_outcome("create", &outcome);
    outcome
}

/// Find the single open pull request from head into base
///
/// Returns `Found` or `UnexpectedError`; zero or several matches count as
/// unexpected since there is no safe way to pick one.
pub async fn locate_proposal(
    api: &dyn PullRequestApi,
    classifier: &dyn ResponseClassifier,
    request: &MergeRequest,
) -> Outcome {
    debug!(base = request.base(), head = request.head(), "Looking up open pull request");

    let outcome = match api.list_open_pulls(request.base(), request.head()).await {
        Ok(response) => classifier.classify_lookup(&response),
        Err(e) => Outcome::UnexpectedError(Unexpected::transport(e.to_string())),
    };
    log_outcome("locate", &outcome);
    outcome
}

/// Merge pull request `number` with a merge commit
///
/// Returns `Merged`, `NotMergeable` or `UnexpectedError`.
pub async fn merge_proposal(
    api: &dyn PullRequestApi,
    classifier: &dyn ResponseClassifier,
    number: u64,
) -> Outcome {
    debug!(number, "Merging pull request");

    let message = merge_commit_message(number);
    let outcome = match api.merge_pull(number, &message).await {
        Ok(response) => classifier.classify_merge(&response),
        Err(e) => Outcome::UnexpectedError(Unexpected::transport(e.to_string())),
    };
    log_outcome("merge", &outcome);
    outcome
}

/// Assign pull request `number` to `assignee`, once
///
/// Returns `Assigned` or `AssignFailed`.
pub async fn assign_proposal(
    api: &dyn PullRequestApi,
    classifier: &dyn ResponseClassifier,
    number: u64,
    assignee: &str,
) -> Outcome {
    debug!(number, assignee, "Assigning pull request");

    let outcome = match api.assign_issue(number, assignee).await {
        Ok(response) => classifier.classify_assign(&response),
        Err(e) => {
            warn!(number, error = %e, "Assignment request failed");
            Outcome::AssignFailed
        }
    };
    log_outcome("assign", &outcome);
    outcome
}

fn log_outcome(operation: &'static str, outcome: &Outcome) {
    match outcome {
        Outcome::UnexpectedError(detail) => {
            warn!(operation, kind = ?detail.kind, %detail, "Unexpected API result")
        }
        other => debug!(operation, outcome = other.tag(), "API result classified"),
    }
}
