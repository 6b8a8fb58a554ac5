//! GitHub REST API client

use crate::{Error, Result};
use automerger_core::{ApiResponse, GitHubConfig};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};
use url::Url;

/// GitHub API client scoped to one repository
pub struct GitHubClient {
    http: Client,
    owner: String,
    repo: String,
    repo_url: Url,
}

impl GitHubClient {
    /// Create a new GitHub client for `repository`
    ///
    /// `repository` accepts `owner/repo`, an HTTPS URL, or an SSH remote.
    /// Every request carries `Authorization: token <token>`.
    pub fn new(token: &str, repository: &str, config: &GitHubConfig) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::Auth("GitHub token must not be empty".to_string()));
        }

        let (owner, repo) = parse_github_url(repository)?;
        let repo_url = repository_url(&config.api_url()?, &owner, &repo)?;

        let mut auth = HeaderValue::from_str(&format!("token {}", token))
            .map_err(|_| Error::Auth("GitHub token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| Error::Parse(format!("Invalid user agent: {}", config.user_agent)))?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        info!(owner = %owner, repo = %repo, api = %repo_url, "Created GitHub client");

        Ok(Self {
            http,
            owner,
            repo,
            repo_url,
        })
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Resolve `path` relative to the repository URL
    pub(crate) fn endpoint(&self, path: &str) -> automerger_core::Result<Url> {
        self.repo_url
            .join(path)
            .map_err(|e| automerger_core::Error::Other(format!("Invalid endpoint {}: {}", path, e)))
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Send a request and capture status and body verbatim
    pub(crate) async fn send(
        &self,
        method: &'static str,
        url: &Url,
        request: RequestBuilder,
    ) -> automerger_core::Result<ApiResponse> {
        debug!(method, url = %url, "GitHub API request");

        let response = request
            .send()
            .await
            .map_err(|e| automerger_core::Error::Transport(describe(&e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| automerger_core::Error::Transport(describe(&e)))?;

        debug!(method, url = %url, status, body = %body, "GitHub API response");
        Ok(ApiResponse::new(status, body))
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("repo_url", &self.repo_url.as_str())
            .finish_non_exhaustive()
    }
}

/// `<api>/repos/<owner>/<repo>/`, keeping any path prefix on `api`
fn repository_url(api: &Url, owner: &str, repo: &str) -> Result<Url> {
    let mut base = api.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("repos/{}/{}/", owner, repo))
        .map_err(|e| Error::Parse(format!("Invalid repository URL: {}", e)))
}

/// Parse a GitHub URL into owner and repo
fn parse_github_url(url: &str) -> Result<(String, String)> {
    let url = url.trim();

    // Handle shorthand: owner/repo
    if !url.contains(':') && !url.contains('/') {
        return Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            url
        )));
    }

    if !url.contains("://") && !url.contains('@') {
        let parts: Vec<&str> = url.split('/').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return Ok((
                parts[0].to_string(),
                parts[1].trim_end_matches(".git").to_string(),
            ));
        }
        return Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            url
        )));
    }

    // Handle HTTPS URL: https://github.com/owner/repo
    if url.starts_with("https://") || url.starts_with("http://") {
        let url = Url::parse(url).map_err(|e| Error::Parse(e.to_string()))?;
        let path = url.path().trim_start_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
        return Err(Error::Parse(format!("Invalid GitHub URL path: {}", path)));
    }

    // Handle SSH URL: git@github.com:owner/repo.git
    if url.starts_with("git@") {
        if let Some(path) = url.split(':').nth(1) {
            let path = path.trim_end_matches(".git");
            let parts: Vec<&str> = path.split('/').collect();
            if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
                return Ok((parts[0].to_string(), parts[1].to_string()));
            }
        }
        return Err(Error::Parse(format!("Invalid SSH URL: {}", url)));
    }

    Err(Error::Parse(format!("Unrecognized URL format: {}", url)))
}
