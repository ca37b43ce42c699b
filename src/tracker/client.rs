//! Pivotal Tracker REST API v5 over a blocking HTTP client.

use anyhow::Context;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Comment, Membership, Project, Story, StoryFilter, StoryUpdate, Tracker};
use crate::git::GitError;

pub const DEFAULT_TRACKER_URL: &str = "https://www.pivotaltracker.com/services/v5";

/// Overrides [`DEFAULT_TRACKER_URL`].
pub const TRACKER_URL_ENV: &str = "GIT_PIVOTAL_TRACKER_URL";

const TOKEN_HEADER: &str = "X-TrackerToken";

pub struct PivotalClient {
    http: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for PivotalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PivotalClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PivotalClient {
    /// Client for the configured API endpoint.
    pub fn new(token: impl Into<String>) -> anyhow::Result<Self> {
        let base_url =
            std::env::var(TRACKER_URL_ENV).unwrap_or_else(|_| DEFAULT_TRACKER_URL.to_string());
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

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> anyhow::Result<T> {
        self.get_with_query(path, &[], what)
    }

    fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> anyhow::Result<T> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(request, what)
    }

    fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, what: &str) -> anyhow::Result<T> {
        let request = self.http.put(self.url(path)).json(body);
        self.send(request, what)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> anyhow::Result<T> {
        let request = request
            .header(TOKEN_HEADER, &self.token)
            .build()
            .context("Failed to build tracker request")?;
        log::debug!("{} {}", request.method(), request.url());

        let response = self.http.execute(request).map_err(|e| GitError::TrackerApi {
            message: format!("{what} failed"),
            detail: e.to_string(),
        })?;
        let status = response.status();
        log::debug!("  -> {status}");
        let body = response.text().map_err(|e| GitError::TrackerApi {
            message: format!("{what} failed (reading response)"),
            detail: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(GitError::TrackerApi {
                message: format!("{what} failed ({})", status_text(status)),
                detail: error_detail(&body),
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            GitError::TrackerApi {
                message: format!("{what} failed (unexpected response)"),
                detail: e.to_string(),
            }
            .into()
        })
    }
}

impl Tracker for PivotalClient {
    fn projects(&self) -> anyhow::Result<Vec<Project>> {
        self.get("/projects", "listing projects")
    }

    fn story(&self, project_id: u64, story_id: u64) -> anyhow::Result<Story> {
        self.get(
            &format!("/projects/{project_id}/stories/{story_id}"),
            &format!("fetching story {story_id}"),
        )
    }

    fn stories(&self, project_id: u64, filter: &StoryFilter) -> anyhow::Result<Vec<Story>> {
        self.get_with_query(
            &format!("/projects/{project_id}/stories"),
            &[
                ("filter", filter.expression()),
                ("limit", filter.limit.to_string()),
            ],
            "searching stories",
        )
    }

    fn comments(&self, project_id: u64, story_id: u64) -> anyhow::Result<Vec<Comment>> {
        self.get_with_query(
            &format!("/projects/{project_id}/stories/{story_id}/comments"),
            &[("fields", ":default,person".to_string())],
            &format!("fetching comments for story {story_id}"),
        )
    }

    fn memberships(&self, project_id: u64) -> anyhow::Result<Vec<Membership>> {
        self.get(
            &format!("/projects/{project_id}/memberships"),
            "listing project members",
        )
    }

    fn update_story(
        &self,
        project_id: u64,
        story_id: u64,
        update: &StoryUpdate,
    ) -> anyhow::Result<Story> {
        self.put(
            &format!("/projects/{project_id}/stories/{story_id}"),
            update,
            &format!("updating story {story_id}"),
        )
    }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// Pull the human-readable part out of an API error body.
///
/// Tracker errors look like `{"kind":"error","error":"...","general_problem":"..."}`;
/// anything else is shown as-is.
fn error_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ApiError {
        error: Option<String>,
        general_problem: Option<String>,
        possible_fix: Option<String>,
    }

    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => [err.error, err.general_problem, err.possible_fix]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n"),
        Err(_) => body.trim().to_string(),
    }
}
