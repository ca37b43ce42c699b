//! `git-pivotal start`: pick a story and branch off for it.

use color_print::cformat;

use super::{current_repository, tracker_client};
use crate::config::Configuration;
use crate::git::{GitError, PullMode, Repository};
use crate::prompt::{Prompt, TerminalPrompt, choose_value};
use crate::styling::{eprintln, get_terminal_width, progress_message, success_message};
use crate::tracker::{
    Story, StoryFilter, StoryState, StoryType, StoryUpdate, Tracker, format_story, story_label,
};

/// What the `start` argument asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorySelection {
    /// A specific story.
    Id(u64),
    /// Choose among startable stories of one type.
    Type(StoryType),
    /// Choose among all startable stories.
    Any,
}

impl StorySelection {
    pub fn parse(filter: Option<&str>) -> Self {
        let Some(filter) = filter.map(str::trim).filter(|f| !f.is_empty()) else {
            return Self::Any;
        };
        if let Ok(id) = filter.parse() {
            return Self::Id(id);
        }
        match filter.parse() {
            Ok(story_type) => Self::Type(story_type),
            Err(_) => {
                log::info!("Ignoring unknown story filter {filter:?}");
                Self::Any
            }
        }
    }
}

pub fn handle_start(filter: Option<&str>) -> anyhow::Result<()> {
    let repo = current_repository()?;
    let prompt = TerminalPrompt;
    let config = Configuration::new(&repo, &prompt);
    let tracker = tracker_client(&config)?;
    start(&repo, &config, &tracker, StorySelection::parse(filter))?;
    Ok(())
}

/// Start a story: choose it, create its branch from an up-to-date base
/// branch, link the two, and mark the story started.
///
/// Returns the new branch name.
pub fn start(
    repo: &Repository,
    config: &Configuration,
    tracker: &dyn Tracker,
    selection: StorySelection,
) -> anyhow::Result<String> {
    repo.ensure_clean_working_tree("start a story")?;
    let project_id = config.project_id(tracker)?;
    let story = select_story(config.prompt(), tracker, project_id, selection)?;

    eprintln!("{}", format_story(&story, &[], get_terminal_width()));
    eprintln!();

    let branch = ask_branch_name(config.prompt(), story.id)?;
    let base_remote = config.base_remote()?;
    let base_branch = config.base_branch()?;

    eprintln!(
        "{}",
        progress_message(cformat!(
            "Updating <bold>{base_branch}</> from <bold>{base_remote}</>..."
        ))
    );
    repo.checkout(&base_branch)?;
    repo.pull(&base_remote, &base_branch, PullMode::FastForwardOnly)?;
    repo.create_branch(&branch)?;
    config.associate_story(story.id)?;

    tracker.update_story(project_id, story.id, &StoryUpdate::state(StoryState::Started))?;
    eprintln!(
        "{}",
        success_message(cformat!(
            "Started story <bold>{}</> on branch <bold>{branch}</>",
            story.id
        ))
    );
    Ok(branch)
}

fn select_story(
    prompt: &dyn Prompt,
    tracker: &dyn Tracker,
    project_id: u64,
    selection: StorySelection,
) -> anyhow::Result<Story> {
    let story_type = match selection {
        StorySelection::Id(id) => return tracker.story(project_id, id),
        StorySelection::Type(story_type) => Some(story_type),
        StorySelection::Any => None,
    };

    let stories = tracker.stories(project_id, &StoryFilter::startable(story_type))?;
    if stories.is_empty() {
        return Err(GitError::NoStoriesAvailable {
            filter: story_type.map(|t| t.to_string()),
        }
        .into());
    }
    let choices: Vec<_> = stories
        .into_iter()
        .map(|story| (story_label(&story), story))
        .collect();
    choose_value(prompt, "Choose story to start: ", &choices)
}

/// Ask for the branch name suffix until a non-blank one is given.
fn ask_branch_name(prompt: &dyn Prompt, story_id: u64) -> anyhow::Result<String> {
    let text = format!("Enter branch name ({story_id}-<branch-name>): ");
    loop {
        let answer = prompt.ask(&text)?;
        let name = answer.split_whitespace().collect::<Vec<_>>().join("-");
        if !name.is_empty() {
            return Ok(format!("{story_id}-{name}"));
        }
    }
}
