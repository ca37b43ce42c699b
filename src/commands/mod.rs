//! The workflow subcommands.
//!
//! Each command has a `handle_*` entry point used by the binary, which wires
//! up the real repository, terminal prompt, and HTTP clients, and a core
//! function taking those collaborators as arguments.

mod config;
mod finish;
mod reminder;
mod start;

pub use config::{config_get, config_set, config_show, handle_config_get, handle_config_set, handle_config_show};
pub use finish::{FinishOptions, finish, handle_finish};
pub use reminder::{handle_reminder, reminder};
pub use start::{StorySelection, handle_start, start};

use crate::config::Configuration;
use crate::git::{GitError, Repository, story_id_from_branch};
use crate::tracker::PivotalClient;

/// The story a branch is working on.
///
/// The branch's own setting wins; otherwise the `<id>-` prefix that `start`
/// gives branch names.
pub(crate) fn story_for_branch(config: &Configuration, branch: &str) -> anyhow::Result<u64> {
    if let Some(id) = config.story_id()? {
        return Ok(id);
    }
    match story_id_from_branch(branch) {
        Some(id) => {
            log::info!("Using story {id} from branch name {branch}");
            Ok(id)
        }
        None => Err(GitError::NoStoryForBranch {
            branch: branch.to_string(),
        }
        .into()),
    }
}

/// The repository for the current directory (or `-C`), verified before any
/// setting is read or asked for.
fn current_repository() -> anyhow::Result<Repository> {
    let repo = Repository::current();
    repo.ensure_repository()?;
    Ok(repo)
}

fn tracker_client(config: &Configuration) -> anyhow::Result<PivotalClient> {
    PivotalClient::new(config.api_token()?)
}
