//! The settings table.
//!
//! Every named setting maps to its git config key, where reads look for it,
//! where a prompted answer is written, and what the operator is asked.
//! [`Configuration`](super::Configuration) consumes this table through one
//! generic get-or-prompt routine.

use super::{Lookup, Scope};

/// A named setting, addressed on the command line by its kebab-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[strum(serialize_all = "kebab-case")]
pub enum Setting {
    /// Remote the base branch is pulled from.
    BaseRemote,
    /// Branch that new story branches start from and pull requests target.
    BaseBranch,
    /// Remote that story branches are pushed to.
    PersonalRemote,
    GithubToken,
    GithubOrg,
    GithubRepo,
    GithubUser,
    /// Owner of the pushed branch, used as the pull request head.
    GithubUsername,
    ApiToken,
    ProjectId,
    /// Display name used to find the operator among project members.
    FullName,
    /// Story associated with the checked-out branch.
    StoryId,
}

/// Storage and prompting rules for one [`Setting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingInfo {
    pub key: &'static str,
    pub read: Lookup,
    pub write: Scope,
    /// What the operator is asked when the value is missing. `None` for
    /// settings that are never prompted for.
    pub prompt: Option<&'static str>,
    /// Holds a credential; masked by `config show`.
    pub secret: bool,
}

impl SettingInfo {
    const fn local(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            read: Lookup::At(Scope::Local),
            write: Scope::Local,
            prompt: Some(prompt),
            secret: false,
        }
    }

    const fn secret(self) -> Self {
        Self { secret: true, ..self }
    }

    const fn inherited(self) -> Self {
        Self {
            read: Lookup::Inherited,
            ..self
        }
    }
}

impl Setting {
    pub fn info(self) -> SettingInfo {
        use Setting::*;
        match self {
            BaseRemote => SettingInfo::local(
                "pivotal.main-remote",
                "What remote should I pull from to start a new branch? ",
            ),
            BaseBranch => SettingInfo::local(
                "pivotal.main-branch",
                "What branch should I base the new branches off of? ",
            ),
            PersonalRemote => SettingInfo::local(
                "pivotal.personal-remote",
                "What remote should I push your topic branches to? ",
            ),
            GithubToken => SettingInfo::local(
                "github.oauth",
                "GitHub OAuth token (https://github.com/settings/tokens): ",
            )
            .secret(),
            GithubOrg => SettingInfo::local("github.org", "GitHub organization (blank for a personal repository)? "),
            GithubRepo => SettingInfo::local("github.repo", "GitHub repository name? "),
            GithubUser => SettingInfo::local("github.user", "GitHub user owning the repository? "),
            GithubUsername => SettingInfo::local(
                "github.username",
                "Your GitHub username (owner of the remote you push to): ",
            ),
            ApiToken => SettingInfo::local(
                "pivotal.api-token",
                "Pivotal API Token (found at https://www.pivotaltracker.com/profile): ",
            )
            .inherited()
            .secret(),
            ProjectId => SettingInfo::local(
                "pivotal.project-id",
                "Choose project associated with this repository: ",
            )
            .inherited(),
            FullName => SettingInfo::local("pivotal.full-name", "Your name as shown in Pivotal Tracker"),
            StoryId => SettingInfo {
                key: "pivotal-story-id",
                read: Lookup::At(Scope::Branch),
                write: Scope::Branch,
                prompt: None,
                secret: false,
            },
        }
    }

    pub fn key(self) -> &'static str {
        self.info().key
    }
}
