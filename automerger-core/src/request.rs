//! The merge intent supplied on the command line

use crate::{Error, Result};

/// A request to merge `head` into `base`
///
/// Validated on construction; branch existence is left to the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    base: String,
    head: String,
}

impl MergeRequest {
    /// Build a merge request, rejecting empty branch names
    pub fn new(base: impl AsRef<str>, head: impl AsRef<str>) -> Result<Self> {
        let base = base.as_ref().trim();
        let head = head.as_ref().trim();

        if base.is_empty() {
            return Err(Error::Validation("base branch must not be empty".to_string()));
        }
        if head.is_empty() {
            return Err(Error::Validation("head branch must not be empty".to_string()));
        }

        Ok(Self {
            base: base.to_string(),
            head: head.to_string(),
        })
    }

    /// Branch receiving the changes
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Branch containing the changes
    pub fn head(&self) -> &str {
        &self.head
    }
}

/// Normalize an optional assignee login; blank means none
pub fn normalize_assignee(login: Option<&str>) -> Option<String> {
    login
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = MergeRequest::new("main", " feature ").unwrap();
        assert_eq!(request.base(), "main");
        assert_eq!(request.head(), "feature");
    }

    #[test]
    fn test_empty_branch_rejected() {
        assert!(matches!(
            MergeRequest::new("", "feature"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            MergeRequest::new("main", "   "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_normalize_assignee() {
        assert_eq!(normalize_assignee(None), None);
        assert_eq!(normalize_assignee(Some("")), None);
        assert_eq!(normalize_assignee(Some(" octocat ")), Some("octocat".to_string()));
    }
}
