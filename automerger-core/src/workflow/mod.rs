//! The merge workflow
//!
//! Drives the four pull request operations top-down. The outcome of each
//! step alone decides the next one:
//!
//! ```text
//! create ─ Created(n) ──────────────┐
//!        ─ AlreadyExists ─ locate ─ Found(n) ─ merge ─ Merged ─────────── Success
//!        ─ NothingToMerge ── NoOp            └ NotMergeable ─ assign? ─── Partial*
//!        ─ UnexpectedError ─ Failure
//! ```

mod progress;
mod resolution;
pub mod state;

pub use progress::{NoProgress, Progress, ProgressHandler};
pub use resolution::{ProposalOrigin, Resolution, TerminalStatus};
pub use state::{MergePhase, StateMachine};

use tracing::{info, warn};

use crate::api::PullRequestApi;
use crate::config::WorkflowConfig;
use crate::error::Result;
use crate::proposal::{assign_proposal, create_proposal, locate_proposal, merge_proposal};
use crate::{MergeRequest, Outcome, ResponseClassifier, Unexpected, UnexpectedKind};

/// One run of the merge workflow
pub struct MergeWorkflow<'a> {
    api: &'a dyn PullRequestApi,
    classifier: &'a dyn ResponseClassifier,
    settings: WorkflowConfig,
    progress: Box<dyn ProgressHandler + 'a>,
    state: StateMachine,
}

impl<'a> MergeWorkflow<'a> {
    /// Create a workflow over the given API and classifier
    pub fn new(api: &'a dyn PullRequestApi, classifier: &'a dyn ResponseClassifier) -> Self {
        Self {
            api,
            classifier,
            settings: WorkflowConfig::default(),
            progress: Box::new(NoProgress),
            state: StateMachine::new(),
        }
    }

    /// Use the given workflow settings
    pub fn with_settings(mut self, settings: WorkflowConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Report intermediate steps to `handler`
    pub fn with_progress(mut self, handler: impl ProgressHandler + 'a) -> Self {
        self.progress = Box::new(handler);
        self
    }

    /// Phase tracker, for inspecting the path taken
    pub fn state(&self) -> &StateMachine {
        &self.state
    }

    /// Run to a terminal state
    ///
    /// Remote failures never become `Err`: they end in a failing
    /// [`Resolution`]. `Err` is reserved for internal phase errors.
    pub async fn run(&mut self, request: &MergeRequest, assignee: Option<&str>) -> Result<Resolution> {
        info!(base = request.base(), head = request.head(), ?assignee, "Starting merge workflow");

        let resolution = match create_proposal(self.api, self.classifier, request).await {
            Outcome::Created(number) => {
                self.progress.on_progress(&Progress::ProposalCreated(number));
                self.merge_created(number, assignee).await?
            }
            Outcome::AlreadyExists => {
                self.progress.on_progress(&Progress::ProposalExists);
                self.merge_existing(request, assignee).await?
            }
            Outcome::NothingToMerge => Resolution::NothingToMerge,
            other => Resolution::CreateFailed {
                base: request.base().to_string(),
                head: request.head().to_string(),
                detail: unexpected_detail(other),
            },
        };

        self.state.transition_to(MergePhase::Done)?;
        info!(status = ?resolution.status(), exit_code = resolution.exit_code(), "Merge workflow finished");
        Ok(resolution)
    }

    async fn merge_created(&mut self, number: u64, assignee: Option<&str>) -> Result<Resolution> {
        self.state.transition_to(MergePhase::Merging)?;

        match merge_proposal(self.api, self.classifier, number).await {
            Outcome::Merged => Ok(Resolution::Merged {
                number,
                origin: ProposalOrigin::Created,
            }),
            Outcome::NotMergeable => {
                self.hand_off(number, ProposalOrigin::Created, assignee).await
            }
            other => Ok(Resolution::MergeFailed {
                number,
                detail: unexpected_detail(other),
            }),
        }
    }

    async fn merge_existing(
        &mut self,
        request: &MergeRequest,
        assignee: Option<&str>,
    ) -> Result<Resolution> {
        self.state.transition_to(MergePhase::Locating)?;

        let number = match locate_proposal(self.api, self.classifier, request).await {
            Outcome::Found(number) => number,
            other => {
                return Ok(Resolution::NotLocated {
                    detail: unexpected_detail(other),
                })
            }
        };
        self.progress.on_progress(&Progress::ProposalFound(number));

        self.state.transition_to(MergePhase::Merging)?;
        let outcome = merge_proposal(self.api, self.classifier, number).await;

        if self.settings.legacy_existing_conflict && outcome != Outcome::Merged {
            warn!(number, outcome = outcome.tag(), "Existing pull request left unmerged");
            return Ok(Resolution::StillUnmergeable { number });
        }

        match outcome {
            Outcome::Merged => Ok(Resolution::Merged {
                number,
                origin: ProposalOrigin::Existing,
            }),
            Outcome::NotMergeable => {
                self.hand_off(number, ProposalOrigin::Existing, assignee).await
            }
            other => Ok(Resolution::MergeFailed {
                number,
                detail: unexpected_detail(other),
            }),
        }
    }

    /// Assign an unmergeable pull request, if someone was named
    async fn hand_off(
        &mut self,
        number: u64,
        origin: ProposalOrigin,
        assignee: Option<&str>,
    ) -> Result<Resolution> {
        let Some(login) = assignee.map(str::trim).filter(|l| !l.is_empty()) else {
            return Ok(Resolution::Unassigned { number, origin });
        };

        self.state.transition_to(MergePhase::Assigning)?;
        let assignee = login.to_string();

        Ok(match assign_proposal(self.api, self.classifier, number, login).await {
            Outcome::Assigned => Resolution::Assigned {
                number,
                origin,
                assignee,
            },
            _ => Resolution::AssignFailed {
                number,
                origin,
                assignee,
            },
        })
    }
}

/// Detail for an outcome the current step cannot act on
fn unexpected_detail(outcome: Outcome) -> Unexpected {
    match outcome {
        Outcome::UnexpectedError(detail) => detail,
        Outcome::NotFound => Unexpected {
            kind: UnexpectedKind::RemoteAmbiguous,
            status: None,
            message: "No matching open pull request".to_string(),
        },
        other => Unexpected {
            kind: UnexpectedKind::RemoteUnexpected,
            status: None,
            message: format!("Unexpected {} result at this step", other.tag()),
        },
    }
}
