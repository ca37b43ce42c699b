//! GitHub pull requests.
//!
//! Only one call is needed: opening a pull request from the pushed story
//! branch into the base branch.

use anyhow::Context;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::git::GitError;

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";

/// Overrides [`DEFAULT_GITHUB_URL`] (GitHub Enterprise: `https://host/api/v3`).
pub const GITHUB_URL_ENV: &str = "GIT_PIVOTAL_GITHUB_URL";

/// The repository pull requests are opened against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: String,
    pub name: String,
}

impl GitHubRepo {
    /// Organization repositories are owned by the organization; personal
    /// ones (blank organization) by the user.
    pub fn new(org: &str, user: &str, name: &str) -> Self {
        let owner = if org.is_empty() { user } else { org };
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    /// `owner:branch` for a branch pushed to a fork.
    pub head: String,
    pub base: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Where pull requests are opened.
pub trait PullRequestHost {
    fn create_pull_request(
        &self,
        repo: &GitHubRepo,
        pull: &NewPullRequest,
    ) -> anyhow::Result<PullRequest>;
}

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> anyhow::Result<Self> {
        let base_url =
            std::env::var(GITHUB_URL_ENV).unwrap_or_else(|_| DEFAULT_GITHUB_URL.to_string());
        Self::with_base_url(token, base_url)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("git-pivotal/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn pulls_url(&self, repo: &GitHubRepo) -> String {
        format!("{}/repos/{}/{}/pulls", self.base_url, repo.owner, repo.name)
    }
}

impl PullRequestHost for GitHubClient {
    fn create_pull_request(
        &self,
        repo: &GitHubRepo,
        pull: &NewPullRequest,
    ) -> anyhow::Result<PullRequest> {
        let url = self.pulls_url(repo);
        log::debug!("POST {url}");
        let api_error = |message: String, detail: String| GitError::GitHubApi { message, detail };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .json(pull)
            .send()
            .map_err(|e| api_error(format!("creating pull request on {repo} failed"), e.to_string()))?;
        let status = response.status();
        log::debug!("  -> {status}");
        let body = response
            .text()
            .map_err(|e| api_error(format!("creating pull request on {repo} failed"), e.to_string()))?;

        if !status.is_success() {
            return Err(api_error(
                format!("creating pull request on {repo} failed ({status})"),
                error_detail(&body),
            )
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            api_error(
                format!("creating pull request on {repo} failed (unexpected response)"),
                e.to_string(),
            )
            .into()
        })
    }
}

/// GitHub errors carry a summary plus per-field messages:
/// `{"message":"Validation Failed","errors":[{"message":"A pull request already exists"}]}`.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ApiError {
        message: String,
        #[serde(default)]
        errors: Vec<FieldError>,
    }
    #[derive(Deserialize)]
    struct FieldError {
        message: Option<String>,
    }

    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => std::iter::once(err.message)
            .chain(err.errors.into_iter().filter_map(|e| e.message))
            .collect::<Vec<_>>()
            .join("\n"),
        Err(_) => body.trim().to_string(),
    }
}
