//! Merge command - create, merge, and hand off a pull request

use std::path::PathBuf;
use std::time::Duration;

use automerger_core::{
    normalize_assignee, CliOverrides, Config, GitHubClassifier, MergeRequest, MergeWorkflow,
    Progress, ProgressHandler, Resolution,
};
use automerger_github::GitHubClient;
use clap::Args;

/// Arguments for merging `head_branch` into `base_branch`
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// An auth token to access the GitHub API (see https://github.com/settings/tokens)
    pub auth_token: String,

    /// The repository that should be used, as owner/repo
    pub repo: String,

    /// The branch where you want the changes to be applied
    pub base_branch: String,

    /// The branch that contains what you would like to be applied
    pub head_branch: String,

    /// Login of the user the pull request is assigned to if it cannot be
    /// merged; if omitted the pull request stays unassigned
    pub assignee_login: Option<String>,

    /// GitHub API root (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, env = "AUTOMERGER_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout, e.g. 30s
    #[arg(long, env = "AUTOMERGER_TIMEOUT", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Exit 0 without assigning when an existing pull request still cannot be merged
    #[arg(long)]
    pub legacy_existing_conflict: bool,

    /// Config file to use instead of ~/.config/automerger/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Why the command stopped before running the workflow
#[derive(Debug)]
pub enum MergeError {
    /// The arguments cannot describe a merge; show usage
    Usage(String),
    /// Anything else that went wrong during setup
    Setup(anyhow::Error),
}

/// Prints intermediate steps the way the finished message is printed
struct PrintProgress {
    verbose: bool,
}

impl ProgressHandler for PrintProgress {
    fn on_progress(&mut self, event: &Progress) {
        match event {
            Progress::ProposalCreated(number) => {
                if self.verbose {
                    println!("Created pull request #{}. Attempting to merge it...", number);
                }
            }
            Progress::ProposalExists => println!(
                "Could not create the pull request because a pull request between these \
                 branches already exists. Attempting to find it..."
            ),
            Progress::ProposalFound(number) => println!(
                "The existing pull request #{} was found. Attempting to merge it...",
                number
            ),
        }
    }
}

impl MergeArgs {
    /// Validate input, build the client and run the workflow
    pub async fn execute(&self, verbose: bool) -> Result<Resolution, MergeError> {
        let request = MergeRequest::new(&self.base_branch, &self.head_branch)
            .map_err(|e| MergeError::Usage(e.to_string()))?;
        let assignee = normalize_assignee(self.assignee_login.as_deref());

        let config = Config::load_with_overrides(
            self.config.as_deref(),
            CliOverrides {
                api_url: self.api_url.clone(),
                timeout: self.timeout,
                legacy_existing_conflict: self.legacy_existing_conflict,
            },
        )
        .map_err(|e| MergeError::Setup(e.into()))?;

        if verbose {
            tracing::info!(
                api_url = %config.github.api_url,
                timeout = ?config.github.timeout,
                legacy_existing_conflict = config.workflow.legacy_existing_conflict,
                "Configuration loaded"
            );
        }

        let client = GitHubClient::new(&self.auth_token, &self.repo, &config.github)
            .map_err(|e| match e {
                automerger_github::Error::Parse(msg) | automerger_github::Error::Auth(msg) => {
                    MergeError::Usage(msg)
                }
                other => MergeError::Setup(other.into()),
            })?;

        let mut workflow = MergeWorkflow::new(&client, &GitHubClassifier)
            .with_settings(config.workflow.clone())
            .with_progress(PrintProgress { verbose });

        workflow
            .run(&request, assignee.as_deref())
            .await
            .map_err(|e| MergeError::Setup(e.into()))
    }
}
