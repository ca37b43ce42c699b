use clap::Subcommand;

use git_pivotal::config::Setting;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// List every setting with its scopes and current value
    ///
    /// Never prompts. Tokens are masked.
    Show,

    /// Print one setting, asking for it when unset
    #[command(after_long_help = r#"## Examples

```console
git-pivotal config get base-branch
git-pivotal config get project-id    # Offers the project menu when unset
```"#)]
    Get {
        /// Setting name
        #[arg(value_enum)]
        setting: Setting,
    },

    /// Store a setting
    ///
    /// Writes to the setting's usual scope: the repository, or the current
    /// branch for `story-id`.
    Set {
        /// Setting name
        #[arg(value_enum)]
        setting: Setting,

        /// New value
        value: String,

        /// Write to the global git config instead
        #[arg(long)]
        global: bool,
    },
}
