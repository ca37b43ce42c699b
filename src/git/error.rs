//! Domain errors and their user-facing formatting.
//!
//! [`GitError`] is a typed enum for failures that callers may want to match
//! on. Convert with `.into()` to get an `anyhow::Error` that still downcasts:
//!
//! ```
//! use git_pivotal::git::GitError;
//!
//! let err: anyhow::Error = GitError::NoProjectsAvailable { cause: None }.into();
//! assert!(matches!(
//!     err.downcast_ref::<GitError>(),
//!     Some(GitError::NoProjectsAvailable { .. })
//! ));
//! ```
//!
//! `Display` produces the styled message printed by `main`.

use std::path::PathBuf;

use color_print::cformat;

use crate::styling::{error_message, format_with_gutter, hint_message, suggest_command};

#[derive(Debug, Clone)]
pub enum GitError {
    /// The working directory is not inside a git working tree.
    NotAGitRepository {
        path: PathBuf,
    },
    DetachedHead {
        action: Option<String>,
    },
    UncommittedChanges {
        action: Option<String>,
    },
    /// A git command exited non-zero.
    CommandFailed {
        command: String,
        error: String,
    },
    /// Input was needed but stdin is closed.
    NotInteractive,
    /// The tracker account has no projects to choose from, or listing them
    /// failed (`cause`).
    NoProjectsAvailable {
        cause: Option<String>,
    },
    NoStoryForBranch {
        branch: String,
    },
    NoStoriesAvailable {
        filter: Option<String>,
    },
    /// A stored setting could not be converted (e.g. a non-numeric project id).
    InvalidSettingValue {
        key: String,
        value: String,
    },
    TrackerApi {
        message: String,
        detail: String,
    },
    GitHubApi {
        message: String,
        detail: String,
    },
    Other {
        message: String,
    },
}

impl std::error::Error for GitError {}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::NotAGitRepository { path } => {
                let path = path.display();
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!("Not a git repository: <bold>{path}</>")),
                    hint_message(cformat!(
                        "Run from inside a repository, or pass <bright-black>-C <<path>></>"
                    ))
                )
            }

            GitError::DetachedHead { action } => {
                let message = match action {
                    Some(action) => format!("Cannot {action}: not on a branch (detached HEAD)"),
                    None => "Not on a branch (detached HEAD)".to_string(),
                };
                write!(
                    f,
                    "{}\n{}",
                    error_message(&message),
                    hint_message(cformat!(
                        "To switch to a branch, run <bright-black>git switch <<branch>></>"
                    ))
                )
            }

            GitError::UncommittedChanges { action } => {
                let message = match action {
                    Some(action) => format!("Cannot {action}: working tree has uncommitted changes"),
                    None => "Working tree has uncommitted changes".to_string(),
                };
                write!(
                    f,
                    "{}\n{}",
                    error_message(&message),
                    hint_message("Commit or stash changes first")
                )
            }

            GitError::CommandFailed { command, error } => {
                let header = error_message(cformat!("Command failed: <bold>{command}</>"));
                write!(f, "{}", format_error_block(header, error))
            }

            GitError::NotInteractive => {
                write!(
                    f,
                    "{}\n{}",
                    error_message("Input required but no terminal is attached"),
                    hint_message(cformat!(
                        "To set values without prompting, run <bright-black>git-pivotal config set <<setting>> <<value>></>"
                    ))
                )
            }

            GitError::NoProjectsAvailable { cause } => {
                let header = error_message("No Pivotal Tracker projects available for this API token");
                write!(
                    f,
                    "{}\n{}",
                    format_error_block(header, cause.as_deref().unwrap_or_default()),
                    hint_message(
                        "Check the token at https://www.pivotaltracker.com/profile and your project memberships"
                    )
                )
            }

            GitError::NoStoryForBranch { branch } => {
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!("No story associated with branch <bold>{branch}</>")),
                    hint_message(cformat!(
                        "To associate one, run <bright-black>git-pivotal config set story-id <<story-id>></>"
                    ))
                )
            }

            GitError::NoStoriesAvailable { filter } => {
                let message = match filter {
                    Some(filter) => cformat!("No unstarted <bold>{filter}</> stories to start"),
                    None => "No unstarted stories to start".to_string(),
                };
                write!(f, "{}", error_message(message))
            }

            GitError::InvalidSettingValue { key, value } => {
                let set_cmd = format!("{} <value>", suggest_command("config", &["set", key], &[]));
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!("Invalid value for <bold>{key}</>: {value:?}")),
                    hint_message(cformat!("To fix it, run <bright-black>{set_cmd}</>"))
                )
            }

            GitError::TrackerApi { message, detail } => {
                let header = error_message(cformat!("Pivotal Tracker: {message}"));
                write!(f, "{}", format_error_block(header, detail))
            }

            GitError::GitHubApi { message, detail } => {
                let header = error_message(cformat!("GitHub: {message}"));
                write!(f, "{}", format_error_block(header, detail))
            }

            GitError::Other { message } => {
                write!(f, "{}", error_message(message))
            }
        }
    }
}

/// Format an error with header and gutter content
fn format_error_block(header: impl Into<String>, error: &str) -> String {
    let header = header.into();
    let trimmed = error.trim();
    if trimmed.is_empty() {
        header
    } else {
        format!("{header}\n{}", format_with_gutter(trimmed, None))
    }
}
