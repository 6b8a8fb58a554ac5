//! Intermediate workflow events for the caller to display

/// A notable step reached before the workflow finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// A new pull request was opened
    ProposalCreated(u64),
    /// Creation was refused because an open pull request already exists
    ProposalExists,
    /// The existing pull request was located
    ProposalFound(u64),
}

/// Receives [`Progress`] events as the workflow runs
pub trait ProgressHandler: Send {
    /// Called once per event, in order
    fn on_progress(&mut self, event: &Progress);
}

/// Handler that ignores all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressHandler for NoProgress {
    fn on_progress(&mut self, _event: &Progress) {}
}

impl<F> ProgressHandler for F
where
    F: FnMut(&Progress) + Send,
{
    fn on_progress(&mut self, event: &Progress) {
        self(event)
    }
}
