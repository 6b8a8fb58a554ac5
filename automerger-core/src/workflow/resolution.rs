//! Terminal states of the merge workflow

use std::fmt;

use crate::Unexpected;

/// Overall status of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    /// The pull request was merged
    Success,
    /// There was nothing to merge
    NoOp,
    /// Not merged, but handed to a human
    PartialSuccess,
    /// Not merged and nobody was assigned
    PartialFailure,
    /// The workflow could not complete
    Failure,
}

/// Where the pull request acted on came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalOrigin {
    /// Opened by this run
    Created,
    /// Already open before this run
    Existing,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Merged successfully
    Merged { number: u64, origin: ProposalOrigin },
    /// No commits between the branches
    NothingToMerge,
    /// Not mergeable; assigned to the fallback reviewer
    Assigned {
        number: u64,
        origin: ProposalOrigin,
        assignee: String,
    },
    /// Not mergeable; assignment failed
    AssignFailed {
        number: u64,
        origin: ProposalOrigin,
        assignee: String,
    },
    /// Not mergeable; no assignee was given
    Unassigned { number: u64, origin: ProposalOrigin },
    /// Existing pull request not merged, reported without failing the run
    ///
    /// Only produced with `legacy_existing_conflict` enabled.
    StillUnmergeable { number: u64 },
    /// The existing pull request could not be identified
    NotLocated { detail: Unexpected },
    /// The merge call failed unexpectedly
    MergeFailed { number: u64, detail: Unexpected },
    /// The create call failed unexpectedly
    CreateFailed {
        base: String,
        head: String,
        detail: Unexpected,
    },
}

impl Resolution {
    /// Status category of this resolution
    pub fn status(&self) -> TerminalStatus {
        match self {
            Resolution::Merged { .. } => TerminalStatus::Success,
            Resolution::NothingToMerge => TerminalStatus::NoOp,
            Resolution::Assigned { .. } => TerminalStatus::PartialSuccess,
            Resolution::AssignFailed { .. } | Resolution::Unassigned { .. } => {
                TerminalStatus::PartialFailure
            }
            Resolution::StillUnmergeable { .. }
            | Resolution::NotLocated { .. }
            | Resolution::MergeFailed { .. }
            | Resolution::CreateFailed { .. } => TerminalStatus::Failure,
        }
    }

    /// Process exit code: 0 when nothing needs attention, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        match self {
            Resolution::Merged { .. } | Resolution::NothingToMerge => 0,
            Resolution::StillUnmergeable { .. } => 0,
            _ => 1,
        }
    }
}

fn unmergeable_prefix(f: &mut fmt::Formatter<'_>, number: u64, origin: ProposalOrigin) -> fmt::Result {
    match origin {
        ProposalOrigin::Created => write!(
            f,
            "The pull request #{number} was created but could not be merged because it is not mergeable."
        ),
        ProposalOrigin::Existing => write!(
            f,
            "The existing pull request #{number} could not be merged because it is not mergeable."
        ),
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Merged {
                number,
                origin: ProposalOrigin::Created,
            } => write!(f, "The pull request #{number} was successfully created and merged."),
            Resolution::Merged {
                number,
                origin: ProposalOrigin::Existing,
            } => write!(f, "The pull request #{number} was successfully merged."),
            Resolution::NothingToMerge => write!(
                f,
                "Could not create the pull request because there is nothing to merge between these branches."
            ),
            Resolution::Assigned {
                number,
                origin,
                assignee,
            } => {
                unmergeable_prefix(f, *number, *origin)?;
                write!(f, " It has been assigned to \"{assignee}\".")
            }
            Resolution::AssignFailed {
                number,
                origin,
                assignee,
            } => {
                unmergeable_prefix(f, *number, *origin)?;
                write!(
                    f,
                    " Also, an error occurred while trying to assign it to \"{assignee}\"."
                )
            }
            Resolution::Unassigned { number, origin } => unmergeable_prefix(f, *number, *origin),
            Resolution::StillUnmergeable { number } => {
                write!(f, "The pull request #{number} is still unmergeable. :(")
            }
            Resolution::NotLocated { detail } => {
                writeln!(f, "The pull request was not found. :(")?;
                write!(f, "{detail}")
            }
            Resolution::MergeFailed { number, detail } => {
                writeln!(
                    f,
                    "Unexpected error while attempting to merge the pull request #{number}."
                )?;
                write!(f, "{detail}")
            }
            Resolution::CreateFailed { base, head, detail } => {
                writeln!(f, "Unexpected error while attempting to create the pull request.")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "Please make sure that the branches \"{base}\" and \"{head}\" exist."
                )?;
                writeln!(f)?;
                writeln!(f, "GitHub API returned: ")?;
                write!(f, "{detail}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let merged = Resolution::Merged {
            number: 1,
            origin: ProposalOrigin::Created,
        };
        assert_eq!(merged.exit_code(), 0);
        assert_eq!(Resolution::NothingToMerge.exit_code(), 0);
        assert_eq!(
            Resolution::Unassigned {
                number: 1,
                origin: ProposalOrigin::Created
            }
            .exit_code(),
            1
        );
        assert_eq!(
            Resolution::NotLocated {
                detail: Unexpected::ambiguous(0)
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_legacy_unmergeable_is_failure_with_exit_zero() {
        let resolution = Resolution::StillUnmergeable { number: 3 };
        assert_eq!(resolution.status(), TerminalStatus::Failure);
        assert_eq!(resolution.exit_code(), 0);
    }

    #[test]
    fn test_statuses() {
        let assigned = Resolution::Assigned {
            number: 2,
            origin: ProposalOrigin::Existing,
            assignee: "octocat".to_string(),
        };
        assert_eq!(assigned.status(), TerminalStatus::PartialSuccess);
        assert_eq!(assigned.exit_code(), 1);

        let failed = Resolution::AssignFailed {
            number: 2,
            origin: ProposalOrigin::Created,
            assignee: "octocat".to_string(),
        };
        assert_eq!(failed.status(), TerminalStatus::PartialFailure);
    }

    #[test]
    fn test_create_failed_message_names_branches() {
        let resolution = Resolution::CreateFailed {
            base: "main".to_string(),
            head: "feature".to_string(),
            detail: Unexpected::transport("connection refused"),
        };
        let text = resolution.to_string();
        assert!(text.contains("\"main\" and \"feature\""));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn test_assigned_message_names_assignee() {
        let resolution = Resolution::Assigned {
            number: 5,
            origin: ProposalOrigin::Created,
            assignee: "octocat".to_string(),
        };
        assert_eq!(
            resolution.to_string(),
            "The pull request #5 was created but could not be merged because it is not mergeable. \
             It has been assigned to \"octocat\"."
        );
    }
}
