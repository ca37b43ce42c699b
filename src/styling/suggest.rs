//! Copy-pasteable command suggestions for hint messages.
//!
//! ```
//! use git_pivotal::styling::suggest_command;
//!
//! let cmd = suggest_command("config", &["set", "base-branch", "main"], &[]);
//! assert_eq!(cmd, "git-pivotal config set base-branch main");
//! ```

use shell_escape::escape;
use std::borrow::Cow;

/// Name the binary is invoked as in suggestions.
pub const COMMAND_NAME: &str = "git-pivotal";

/// Build a suggested command string like `git-pivotal finish --no-complete`.
///
/// Arguments are shell-escaped. A `--` separator is inserted before the first
/// argument starting with `-` so it isn't parsed as a flag.
pub fn suggest_command(subcommand: &str, args: &[&str], flags: &[&str]) -> String {
    let mut parts = vec![COMMAND_NAME.to_string(), subcommand.to_string()];

    let mut separator_inserted = false;
    for arg in args {
        if arg.starts_with('-') && !separator_inserted {
            parts.push("--".to_string());
            separator_inserted = true;
        }
        parts.push(escape(Cow::Borrowed(*arg)).into_owned());
    }

    parts.extend(flags.iter().map(|s| s.to_string()));
    parts.join(" ")
}
