//! Workflow phase tracking
//!
//! A small state machine recording which operation the merge workflow is
//! in. It only validates and logs transitions; decisions are made by the
//! workflow from each operation's [`Outcome`](crate::Outcome).

use crate::error::{Error, Result};
use std::fmt;

/// Phase of the merge workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePhase {
    /// Asking the API to open a pull request
    Creating,
    /// Looking up the pull request that already exists
    Locating,
    /// Attempting the merge
    Merging,
    /// Handing the pull request to the fallback assignee
    Assigning,
    /// A terminal state was reached
    Done,
}

impl MergePhase {
    /// Phases reachable from this one
    pub fn valid_transitions(&self) -> &'static [MergePhase] {
        match self {
            MergePhase::Creating => &[MergePhase::Merging, MergePhase::Locating, MergePhase::Done],
            MergePhase::Locating => &[MergePhase::Merging, MergePhase::Done],
            MergePhase::Merging => &[MergePhase::Assigning, MergePhase::Done],
            MergePhase::Assigning => &[MergePhase::Done],
            MergePhase::Done => &[],
        }
    }

    /// Check whether moving to `to` is allowed
    pub fn can_transition_to(&self, to: &MergePhase) -> bool {
        self.valid_transitions().contains(to)
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            MergePhase::Creating => "Creating pull request",
            MergePhase::Locating => "Locating existing pull request",
            MergePhase::Merging => "Merging pull request",
            MergePhase::Assigning => "Assigning pull request",
            MergePhase::Done => "Done",
        }
    }
}

impl fmt::Display for MergePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Tracks the current phase and the path taken to reach it
#[derive(Debug, Clone)]
pub struct StateMachine {
    current_phase: MergePhase,
    history: Vec<MergePhase>,
}

impl StateMachine {
    /// Start in [`MergePhase::Creating`]
    pub fn new() -> Self {
        Self {
            current_phase: MergePhase::Creating,
            history: vec![MergePhase::Creating],
        }
    }

    /// Current phase
    pub fn current_phase(&self) -> MergePhase {
        self.current_phase
    }

    /// Every phase visited so far, in order
    pub fn history(&self) -> &[MergePhase] {
        &self.history
    }

    /// Whether a terminal state was reached
    pub fn is_done(&self) -> bool {
        self.current_phase == MergePhase::Done
    }

    /// Attempt to transition to a new phase
    pub fn transition_to(&mut self, phase: MergePhase) -> Result<()> {
        if !self.current_phase.can_transition_to(&phase) {
            return Err(Error::Workflow(format!(
                "Invalid transition from {:?} to {:?}",
                self.current_phase, phase
            )));
        }

        tracing::info!(
            from = ?self.current_phase,
            to = ?phase,
            "Workflow phase transition"
        );

        self.current_phase = phase;
        self.history.push(phase);
        Ok(())
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
