//! Pull request endpoints

use async_trait::async_trait;
use automerger_core::{ApiResponse, NewPullRequest, PullRequestApi, Result};
use serde_json::json;

use crate::GitHubClient;

impl GitHubClient {
    /// Qualify a bare branch name as `owner:branch` for the `head` filter
    ///
    /// GitHub only honours the filter in that form; an already qualified
    /// name is passed through.
    fn head_filter(&self, head: &str) -> String {
        if head.contains(':') {
            head.to_string()
        } else {
            format!("{}:{}", self.owner(), head)
        }
    }
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    async fn create_pull(&self, pull: &NewPullRequest) -> Result<ApiResponse> {
        let url = self.endpoint("pulls")?;
        let request = self.http().post(url.clone()).json(pull);
        self.send("POST", &url, request).await
    }

    async fn list_open_pulls(&self, base: &str, head: &str) -> Result<ApiResponse> {
        let mut url = self.endpoint("pulls")?;
        url.query_pairs_mut()
            .append_pair("state", "open")
            .append_pair("head", &self.head_filter(head))
            .append_pair("base", base);
        let request = self.http().get(url.clone());
        self.send("GET", &url, request).await
    }

    async fn merge_pull(&self, number: u64, commit_message: &str) -> Result<ApiResponse> {
        let url = self.endpoint(&format!("pulls/{}/merge", number))?;
        let request = self
            .http()
            .put(url.clone())
            .json(&json!({ "commit_message": commit_message }));
        self.send("PUT", &url, request).await
    }

    async fn assign_issue(&self, number: u64, assignee: &str) -> Result<ApiResponse> {
        let url = self.endpoint(&format!("issues/{}", number))?;
        let request = self
            .http()
            .patch(url.clone())
            .json(&json!({ "assignee": assignee }));
        self.send("PATCH", &url, request).await
    }
}
