//! Response classification
//!
//! GitHub answers several distinct conditions with the same status code.
//! In particular a 422 from the create endpoint means either "nothing to
//! merge" or "a pull request already exists", and the only way to tell
//! them apart is the wording of the first validation error. That coupling
//! is kept here so the workflow only ever sees an [`Outcome`].

use serde::Deserialize;
use tracing::debug;

use crate::{ApiResponse, ApiStatus, Outcome, Unexpected};

/// Substring GitHub uses when head has no commits ahead of base
pub const NO_COMMITS_BETWEEN: &str = "No commits between";

/// Substring GitHub uses when an open PR already covers the branch pair
pub const PULL_REQUEST_ALREADY_EXISTS: &str = "A pull request already exists";

/// Turns raw API responses into outcomes, one method per operation
pub trait ResponseClassifier: Send + Sync {
    /// Classify the response to a create-pull-request call
    fn classify_create(&self, response: &ApiResponse) -> Outcome;

    /// Classify the response to a list-open-pulls call
    fn classify_lookup(&self, response: &ApiResponse) -> Outcome;

    /// Classify the response to a merge call
    fn classify_merge(&self, response: &ApiResponse) -> Outcome;

    /// Classify the response to an assign call
    fn classify_assign(&self, response: &ApiResponse) -> Outcome;
}

#[derive(Debug, Deserialize)]
struct ValidationFailure {
    #[serde(default)]
    errors: Vec<ValidationError>,
}

#[derive(Debug, Deserialize)]
struct ValidationError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullNumber {
    number: u64,
}

/// Message of the first entry in a GitHub validation error body
fn first_error_message(body: &str) -> Option<String> {
    let failure: ValidationFailure = serde_json::from_str(body).ok()?;
    failure.errors.into_iter().next()?.message
}

/// Classifier for the GitHub REST v3 API
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubClassifier;

impl ResponseClassifier for GitHubClassifier {
    fn classify_create(&self, response: &ApiResponse) -> Outcome {
        match response.status {
            ApiStatus::Created => match serde_json::from_str::<PullNumber>(&response.body) {
                Ok(pr) => Outcome::Created(pr.number),
                Err(e) => {
                    debug!(error = %e, "Created response without a PR number");
                    Outcome::UnexpectedError(Unexpected::remote(response))
                }
            },
            ApiStatus::UnprocessableEntity => {
                match first_error_message(&response.body) {
                    Some(message) if message.contains(NO_COMMITS_BETWEEN) => {
                        Outcome::NothingToMerge
                    }
                    Some(message) if message.contains(PULL_REQUEST_ALREADY_EXISTS) => {
                        Outcome::AlreadyExists
                    }
                    _ => Outcome::UnexpectedError(Unexpected::remote(response)),
                }
            }
            _ => Outcome::UnexpectedError(Unexpected::remote(response)),
        }
    }

    fn classify_lookup(&self, response: &ApiResponse) -> Outcome {
        if response.status != ApiStatus::Ok {
            return Outcome::UnexpectedError(Unexpected::remote(response));
        }

        match serde_json::from_str::<Vec<PullNumber>>(&response.body) {
            Ok(pulls) if pulls.len() == 1 => Outcome::Found(pulls[0].number),
            Ok(pulls) => Outcome::UnexpectedError(Unexpected::ambiguous(pulls.len())),
            Err(e) => {
                debug!(error = %e, "Lookup response is not a list of pull requests");
                Outcome::UnexpectedError(Unexpected::remote(response))
            }
        }
    }

    fn classify_merge(&self, response: &ApiResponse) -> Outcome {
        match response.status {
            ApiStatus::Ok => Outcome::Merged,
            ApiStatus::MethodNotAllowed => Outcome::NotMergeable,
            _ => Outcome::UnexpectedError(Unexpected::remote(response)),
        }
    }

    fn classify_assign(&self, response: &ApiResponse) -> Outcome {
        match response.status {
            ApiStatus::Ok => Outcome::Assigned,
            _ => Outcome::AssignFailed,
        }
    }
}
