//! Classified results of the remote API operations

use std::fmt;

/// HTTP statuses the workflow distinguishes
///
/// Anything outside the handful of codes the GitHub pulls API uses to
/// signal meaningful results is carried as [`ApiStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// 200
    Ok,
    /// 201
    Created,
    /// 405, returned by the merge endpoint for conflicted or blocked PRs
    MethodNotAllowed,
    /// 422, returned by the create endpoint for several distinct conditions
    UnprocessableEntity,
    /// Any other status code
    Other(u16),
}

impl ApiStatus {
    /// The numeric status code
    pub fn code(self) -> u16 {
        match self {
            ApiStatus::Ok => 200,
            ApiStatus::Created => 201,
            ApiStatus::MethodNotAllowed => 405,
            ApiStatus::UnprocessableEntity => 422,
            ApiStatus::Other(code) => code,
        }
    }
}

impl From<u16> for ApiStatus {
    fn from(code: u16) -> Self {
        match code {
            200 => ApiStatus::Ok,
            201 => ApiStatus::Created,
            405 => ApiStatus::MethodNotAllowed,
            422 => ApiStatus::UnprocessableEntity,
            other => ApiStatus::Other(other),
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A raw response from the remote API, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: ApiStatus,
    /// Response body, verbatim
    pub body: String,
}

impl ApiResponse {
    /// Create a response from a status code and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::from(status),
            body: body.into(),
        }
    }
}

/// Why an operation ended in [`Outcome::UnexpectedError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedKind {
    /// Lookup matched zero or several open pull requests
    RemoteAmbiguous,
    /// The API answered with a status (or body) the operation does not handle
    RemoteUnexpected,
    /// No HTTP response at all
    Transport,
}

/// Detail attached to an unexpected outcome, surfaced to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unexpected {
    /// Classification of the failure
    pub kind: UnexpectedKind,
    /// HTTP status, when a response was received
    pub status: Option<ApiStatus>,
    /// Human-readable detail (usually the raw body)
    pub message: String,
}

impl Unexpected {
    /// Unexpected status or body from the API
    pub fn remote(response: &ApiResponse) -> Self {
        Self {
            kind: UnexpectedKind::RemoteUnexpected,
            status: Some(response.status),
            message: response.body.clone(),
        }
    }

    /// Lookup returned something other than exactly one match
    pub fn ambiguous(count: usize) -> Self {
        Self {
            kind: UnexpectedKind::RemoteAmbiguous,
            status: Some(ApiStatus::Ok),
            message: format!(
                "Response code is OK but the length of the array is {count}, expected 1."
            ),
        }
    }

    /// The request failed before a response arrived
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: UnexpectedKind::Transport,
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Unexpected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "Response code: {}. Body: {}", status, self.message),
            None => write!(f, "Request failed: {}", self.message),
        }
    }
}

/// Result of a single API operation
///
/// Each variant has exactly one meaning to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new pull request was opened
    Created(u64),
    /// An open pull request between the branches already exists
    AlreadyExists,
    /// Head has no commits that base lacks
    NothingToMerge,
    /// The existing pull request was located
    Found(u64),
    /// No pull request could be located
    NotFound,
    /// The pull request was merged
    Merged,
    /// The pull request has conflicts or fails required checks
    NotMergeable,
    /// The pull request was assigned to the fallback reviewer
    Assigned,
    /// Assignment was attempted and failed
    AssignFailed,
    /// Anything the workflow cannot act on
    UnexpectedError(Unexpected),
}

impl Outcome {
    /// Short tag name, used in log fields
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Created(_) => "created",
            Outcome::AlreadyExists => "already_exists",
            Outcome::NothingToMerge => "nothing_to_merge",
            Outcome::Found(_) => "found",
            Outcome::NotFound => "not_found",
            Outcome::Merged => "merged",
            Outcome::NotMergeable => "not_mergeable",
            Outcome::Assigned => "assigned",
            Outcome::AssignFailed => "assign_failed",
            Outcome::UnexpectedError(_) => "unexpected_error",
        }
    }
}
