//! `git-pivotal reminder`: show the story for the current branch.

use super::{current_repository, story_for_branch, tracker_client};
use crate::config::Configuration;
use crate::git::Repository;
use crate::prompt::TerminalPrompt;
use crate::styling::{get_terminal_width, println};
use crate::tracker::{Tracker, format_story};

pub fn handle_reminder() -> anyhow::Result<()> {
    let repo = current_repository()?;
    let prompt = TerminalPrompt;
    let config = Configuration::new(&repo, &prompt);
    let tracker = tracker_client(&config)?;
    println!("{}", reminder(&repo, &config, &tracker, get_terminal_width())?);
    Ok(())
}

/// The current branch's story with its comments, rendered `width` columns wide.
pub fn reminder(
    repo: &Repository,
    config: &Configuration,
    tracker: &dyn Tracker,
    width: usize,
) -> anyhow::Result<String> {
    let branch = repo.require_current_branch("show the story")?;
    let project_id = config.project_id(tracker)?;
    let story_id = story_for_branch(config, &branch)?;
    let story = tracker.story(project_id, story_id)?;
    let comments = tracker.comments(project_id, story_id)?;
    Ok(format_story(&story, &comments, width))
}
