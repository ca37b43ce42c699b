//! Pivotal Tracker: the stories a branch is linked to.
//!
//! [`Tracker`] is the seam between the workflow commands and the REST API.
//! [`PivotalClient`] talks to the real service; tests substitute an
//! in-memory implementation.

mod client;
mod display;

use serde::{Deserialize, Serialize};

pub use client::{DEFAULT_TRACKER_URL, PivotalClient, TRACKER_URL_ENV};
pub use display::{format_story, story_label};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoryType {
    Feature,
    Bug,
    Chore,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryState {
    Unscheduled,
    Unstarted,
    Planned,
    Started,
    Finished,
    Delivered,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Story {
    pub id: u64,
    pub name: String,
    pub story_type: StoryType,
    pub current_state: StoryState,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimate: Option<f64>,
    #[serde(default)]
    pub owner_ids: Vec<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub initials: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Membership {
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields to change on a story. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_state: Option<StoryState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_ids: Option<Vec<u64>>,
}

impl StoryUpdate {
    pub fn state(state: StoryState) -> Self {
        Self {
            current_state: Some(state),
            ..Self::default()
        }
    }

    pub fn with_owner(mut self, owner_id: u64) -> Self {
        self.owner_ids = Some(vec![owner_id]);
        self
    }
}

/// Which stories `start` offers.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryFilter {
    pub story_type: Option<StoryType>,
    pub states: Vec<StoryState>,
    pub limit: usize,
}

impl StoryFilter {
    /// Stories nobody has picked up yet, optionally of one type.
    pub fn startable(story_type: Option<StoryType>) -> Self {
        Self {
            story_type,
            states: vec![
                StoryState::Unstarted,
                StoryState::Unscheduled,
                StoryState::Rejected,
            ],
            limit: 5,
        }
    }

    /// The tracker search expression, e.g. `current_state:unstarted,rejected story_type:bug`.
    pub fn expression(&self) -> String {
        let states: Vec<String> = self.states.iter().map(ToString::to_string).collect();
        let mut expr = format!("current_state:{}", states.join(","));
        if let Some(story_type) = self.story_type {
            expr.push_str(&format!(" story_type:{story_type}"));
        }
        expr
    }
}

/// The tracker operations the workflow needs.
pub trait Tracker {
    fn projects(&self) -> anyhow::Result<Vec<Project>>;
    fn story(&self, project_id: u64, story_id: u64) -> anyhow::Result<Story>;
    fn stories(&self, project_id: u64, filter: &StoryFilter) -> anyhow::Result<Vec<Story>>;
    fn comments(&self, project_id: u64, story_id: u64) -> anyhow::Result<Vec<Comment>>;
    fn memberships(&self, project_id: u64) -> anyhow::Result<Vec<Membership>>;
    fn update_story(
        &self,
        project_id: u64,
        story_id: u64,
        update: &StoryUpdate,
    ) -> anyhow::Result<Story>;
}
