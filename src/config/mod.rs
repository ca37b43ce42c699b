//! Settings for git-pivotal, stored in git config.
//!
//! There is no configuration file of our own. Every setting is a git config
//! key at one of three scopes:
//!
//! - **global** (`~/.gitconfig`): shared across repositories
//! - **local** (`.git/config`): this repository
//! - **branch** (`.git/config`, `branch.<name>.<key>`): the checked-out branch
//!
//! Reads either target one scope or walk the inherited chain (branch, local,
//! global). [`Configuration`] adds the workflow rule on top: a missing value
//! is asked for once, saved, and never asked for again.
//!
//! The full table of settings lives in [`Setting::info`].

mod settings;
mod store;

pub use settings::{Setting, SettingInfo};
pub use store::{ConfigBackend, ConfigStore, INHERITED_CHAIN, Lookup, Scope};
#[cfg(test)]
pub(crate) use store::testing::MemoryBackend;

use crate::git::GitError;
use crate::prompt::{Prompt, choose_value};
use crate::tracker::Tracker;

/// Named settings with get-or-prompt-and-save semantics.
pub struct Configuration<'a> {
    store: ConfigStore<'a>,
    prompt: &'a dyn Prompt,
}

impl<'a> Configuration<'a> {
    pub fn new(backend: &'a dyn ConfigBackend, prompt: &'a dyn Prompt) -> Self {
        Self {
            store: ConfigStore::new(backend),
            prompt,
        }
    }

    pub fn store(&self) -> ConfigStore<'a> {
        self.store
    }

    pub fn prompt(&self) -> &'a dyn Prompt {
        self.prompt
    }

    /// The stored value visible at the setting's read scope, without prompting.
    ///
    /// Empty when unset.
    pub fn value(&self, setting: Setting) -> anyhow::Result<String> {
        let info = setting.info();
        self.store.get(info.key, info.read)
    }

    /// The value of `setting`, asking for it (and saving the answer) if unset.
    ///
    /// Settings without a prompt (the story id) return the stored value or
    /// an empty string. The project id is only ever chosen from the
    /// tracker's projects: when unset this fails without asking, and
    /// [`Self::project_id`] is the way to choose one.
    pub fn get(&self, setting: Setting) -> anyhow::Result<String> {
        match setting {
            Setting::FullName => self.full_name(None),
            Setting::ProjectId => {
                let value = self.value(setting)?;
                if value.is_empty() {
                    return Err(GitError::Other {
                        message: format!(
                            "{setting} is not set; it is chosen from the tracker's project list"
                        ),
                    }
                    .into());
                }
                Ok(value)
            }
            _ => self.get_or_prompt(setting, |text| self.prompt.ask(text)),
        }
    }

    /// Store `value` for `setting` at its write scope, or globally.
    pub fn set(&self, setting: Setting, value: &str, global: bool) -> anyhow::Result<()> {
        let info = setting.info();
        let scope = match (global, info.write) {
            (false, scope) => scope,
            (true, Scope::Branch) => {
                return Err(GitError::Other {
                    message: format!("{setting} is stored per branch and cannot be set globally"),
                }
                .into());
            }
            (true, _) => Scope::Global,
        };
        if setting == Setting::StoryId || setting == Setting::ProjectId {
            parse_id(setting, value)?;
        }
        self.store.set(info.key, value.trim(), scope)
    }

    /// Look the value up; when empty, call `ask` with the prompt text and
    /// persist whatever comes back, empty answers included.
    fn get_or_prompt(
        &self,
        setting: Setting,
        ask: impl FnOnce(&str) -> anyhow::Result<String>,
    ) -> anyhow::Result<String> {
        let info = setting.info();
        let value = self.store.get(info.key, info.read)?;
        if !value.is_empty() {
            return Ok(value);
        }
        let Some(text) = info.prompt else {
            return Ok(value);
        };
        log::debug!("{} is not set; asking", info.key);
        let value = ask(text)?;
        self.store.set(info.key, &value, info.write)?;
        Ok(value)
    }

    pub fn base_remote(&self) -> anyhow::Result<String> {
        self.get(Setting::BaseRemote)
    }

    pub fn base_branch(&self) -> anyhow::Result<String> {
        self.get(Setting::BaseBranch)
    }

    pub fn personal_remote(&self) -> anyhow::Result<String> {
        self.get(Setting::PersonalRemote)
    }

    pub fn github_token(&self) -> anyhow::Result<String> {
        self.get(Setting::GithubToken)
    }

    pub fn github_org(&self) -> anyhow::Result<String> {
        self.get(Setting::GithubOrg)
    }

    pub fn github_repo(&self) -> anyhow::Result<String> {
        self.get(Setting::GithubRepo)
    }

    pub fn github_user(&self) -> anyhow::Result<String> {
        self.get(Setting::GithubUser)
    }

    pub fn github_username(&self) -> anyhow::Result<String> {
        self.get(Setting::GithubUsername)
    }

    /// Pivotal Tracker API token. Found in any scope; saved locally when asked.
    pub fn api_token(&self) -> anyhow::Result<String> {
        self.get(Setting::ApiToken)
    }

    /// The operator's tracker display name.
    ///
    /// `suggestion` (usually git's `user.name`) is offered in the prompt and
    /// used when the answer is blank.
    pub fn full_name(&self, suggestion: Option<&str>) -> anyhow::Result<String> {
        let suggestion = suggestion.map(str::trim).filter(|s| !s.is_empty());
        self.get_or_prompt(Setting::FullName, |text| {
            let text = match suggestion {
                Some(s) => format!("{text} [{s}]: "),
                None => format!("{text}: "),
            };
            let answer = self.prompt.ask(&text)?;
            Ok(match suggestion {
                Some(s) if answer.is_empty() => s.to_string(),
                _ => answer,
            })
        })
    }

    /// The tracker project for this repository.
    ///
    /// When unset, offers the account's projects sorted by name and saves the
    /// chosen id locally. No projects (or no answer from the tracker) is
    /// [`GitError::NoProjectsAvailable`], carrying the tracker's error if
    /// there was one, and nothing is saved.
    pub fn project_id(&self, tracker: &dyn Tracker) -> anyhow::Result<u64> {
        let value = self.get_or_prompt(Setting::ProjectId, |text| {
            let mut projects = tracker.projects().map_err(|e| GitError::NoProjectsAvailable {
                cause: Some(failure_cause(&e)),
            })?;
            if projects.is_empty() {
                return Err(GitError::NoProjectsAvailable { cause: None }.into());
            }
            projects.sort_by(|a, b| a.name.cmp(&b.name));
            let choices: Vec<_> = projects
                .into_iter()
                .map(|p| (p.name, p.id.to_string()))
                .collect();
            choose_value(self.prompt, text, &choices)
        })?;
        parse_id(Setting::ProjectId, &value)
    }

    /// The story associated with the checked-out branch, if any.
    pub fn story_id(&self) -> anyhow::Result<Option<u64>> {
        let value = self.value(Setting::StoryId)?;
        if value.is_empty() {
            return Ok(None);
        }
        parse_id(Setting::StoryId, &value).map(Some)
    }

    /// Link `story_id` to the checked-out branch.
    pub fn associate_story(&self, story_id: u64) -> anyhow::Result<()> {
        let info = Setting::StoryId.info();
        self.store.set(info.key, &story_id.to_string(), info.write)
    }
}

/// The tracker's own message for a failed call, without styling.
fn failure_cause(err: &anyhow::Error) -> String {
    match err.downcast_ref::<GitError>() {
        Some(GitError::TrackerApi { message, detail }) if detail.trim().is_empty() => {
            message.clone()
        }
        Some(GitError::TrackerApi { message, detail }) => format!("{message}: {}", detail.trim()),
        _ => format!("{err:#}"),
    }
}

fn parse_id(setting: Setting, value: &str) -> anyhow::Result<u64> {
    value.trim().parse().map_err(|_| {
        GitError::InvalidSettingValue {
            key: setting.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}
