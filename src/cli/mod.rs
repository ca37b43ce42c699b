mod config;

pub(crate) use config::ConfigCommand;

use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{Parser, Subcommand};

/// Custom styles for help output
fn help_styles() -> Styles {
    Styles::styled()
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .usage(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
}

/// Help template for commands
const HELP_TEMPLATE: &str = "\
{before-help}{name} - {about-with-newline}
Usage: {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "git-pivotal")]
#[command(about = "Work on Pivotal Tracker stories in git branches", long_about = None)]
#[command(version, styles = help_styles(), help_template = HELP_TEMPLATE)]
#[command(after_long_help = "\
Getting started

  git-pivotal start             # Pick a story and create its branch
  git-pivotal reminder          # Show the story for this branch
  git-pivotal finish            # Push, open a pull request, finish the story
  git-pivotal config show       # List settings stored in git config

Missing settings are asked for the first time they're needed.")]
pub(crate) struct Cli {
    /// Working directory for this command
    #[arg(
        short = 'C',
        global = true,
        value_name = "path",
        display_order = 100,
        help_heading = "Global Options"
    )]
    pub directory: Option<std::path::PathBuf>,

    /// Show progress logs (-v), or also every git command and HTTP call (-vv)
    #[arg(
        long,
        short = 'v',
        global = true,
        action = clap::ArgAction::Count,
        display_order = 101,
        help_heading = "Global Options"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start a story on a new branch
    ///
    /// Offers the startable stories (unstarted, unscheduled, or rejected) of
    /// the configured project, creates `<id>-<name>` from the updated base
    /// branch, and marks the story started.
    #[command(after_long_help = r#"## Examples

```console
git-pivotal start            # Choose among all startable stories
git-pivotal start bug        # Only bugs (feature, bug, chore, release)
git-pivotal start 12345678   # A specific story
```

The working tree must be clean."#)]
    Start {
        /// Story id or story type
        filter: Option<String>,
    },

    /// Finish the story on the current branch
    ///
    /// Merges the base branch, pushes to the personal remote, opens a pull
    /// request on GitHub, and marks the story finished.
    Finish {
        /// Open the pull request without finishing the story
        #[arg(long)]
        no_complete: bool,
    },

    /// Show the story for the current branch
    Reminder,

    /// Show and edit settings
    #[command(subcommand)]
    Config(ConfigCommand),
}
