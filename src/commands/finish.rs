//! `git-pivotal finish`: push the story branch and open a pull request.

use color_print::cformat;

use super::{current_repository, story_for_branch, tracker_client};
use crate::config::Configuration;
use crate::git::{PullMode, Repository};
use crate::github::{GitHubClient, GitHubRepo, NewPullRequest, PullRequest, PullRequestHost};
use crate::prompt::TerminalPrompt;
use crate::styling::{eprintln, println, progress_message, success_message, warning_message};
use crate::tracker::{Membership, Story, StoryState, StoryUpdate, Tracker};

#[derive(Debug, Clone, Copy)]
pub struct FinishOptions {
    /// Mark the story finished once the pull request is open.
    pub complete: bool,
}

impl Default for FinishOptions {
    fn default() -> Self {
        Self { complete: true }
    }
}

pub fn handle_finish(options: FinishOptions) -> anyhow::Result<()> {
    let repo = current_repository()?;
    let prompt = TerminalPrompt;
    let config = Configuration::new(&repo, &prompt);
    let tracker = tracker_client(&config)?;
    let github = GitHubClient::new(config.github_token()?)?;

    let pull_request = finish(&repo, &config, &tracker, &github, options)?;
    println!("{}", pull_request.html_url);
    Ok(())
}

/// Finish the story on the current branch.
///
/// Every setting that might need asking for is resolved before anything is
/// pushed, so an interrupted prompt leaves the remote untouched.
pub fn finish(
    repo: &Repository,
    config: &Configuration,
    tracker: &dyn Tracker,
    host: &dyn PullRequestHost,
    options: FinishOptions,
) -> anyhow::Result<PullRequest> {
    repo.ensure_clean_working_tree("finish a story")?;
    let branch = repo.require_current_branch("finish a story")?;

    let project_id = config.project_id(tracker)?;
    let story_id = story_for_branch(config, &branch)?;
    let story = tracker.story(project_id, story_id)?;

    let base_remote = config.base_remote()?;
    let base_branch = config.base_branch()?;
    let personal_remote = config.personal_remote()?;
    let github_repo = GitHubRepo::new(
        &config.github_org()?,
        &config.github_user()?,
        &config.github_repo()?,
    );
    let username = config.github_username()?;
    let owner_name = if options.complete {
        Some(config.full_name(repo.user_name()?.as_deref())?)
    } else {
        None
    };

    eprintln!(
        "{}",
        progress_message(cformat!(
            "Merging <bold>{base_remote}/{base_branch}</> into <bold>{branch}</>..."
        ))
    );
    repo.pull(&base_remote, &base_branch, PullMode::Merge)?;
    eprintln!(
        "{}",
        progress_message(cformat!("Pushing <bold>{branch}</> to <bold>{personal_remote}</>..."))
    );
    repo.push(&personal_remote, &branch)?;

    let pull = NewPullRequest {
        title: format!("{} [#{}]", story.name, story.id),
        head: format!("{username}:{branch}"),
        base: base_branch,
        body: pull_request_body(&story),
    };
    let pull_request = host.create_pull_request(&github_repo, &pull)?;
    eprintln!(
        "{}",
        success_message(cformat!(
            "Opened pull request <bold>#{}</> on <bold>{github_repo}</>",
            pull_request.number
        ))
    );

    if let Some(owner_name) = owner_name {
        complete_story(tracker, project_id, &story, &owner_name)?;
    }
    Ok(pull_request)
}

fn pull_request_body(story: &Story) -> String {
    match story.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => format!("{}\n\n{description}", story.url),
        _ => story.url.clone(),
    }
}

/// The member whose display name matches `name`, ignoring case and
/// surrounding whitespace.
fn find_member<'m>(members: &'m [Membership], name: &str) -> Option<&'m Membership> {
    let name = name.trim();
    members
        .iter()
        .find(|m| m.person.name.trim().eq_ignore_ascii_case(name))
}

fn complete_story(
    tracker: &dyn Tracker,
    project_id: u64,
    story: &Story,
    owner_name: &str,
) -> anyhow::Result<()> {
    let members = tracker.memberships(project_id)?;
    let mut update = StoryUpdate::state(StoryState::Finished);
    match find_member(&members, owner_name) {
        Some(member) => update = update.with_owner(member.person.id),
        None => eprintln!(
            "{}",
            warning_message(cformat!(
                "No project member named <bold>{owner_name}</>; leaving the story's owners unchanged"
            ))
        ),
    }
    tracker.update_story(project_id, story.id, &update)?;
    eprintln!(
        "{}",
        success_message(cformat!("Finished story <bold>{}</>", story.id))
    );
    Ok(())
}
