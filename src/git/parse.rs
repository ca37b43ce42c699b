//! Parsing of branch names and branch-scoped config keys.

use std::sync::LazyLock;

use regex::Regex;

static STORY_ID_IN_BRANCH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)-").unwrap());

/// Extract the story id embedded in a branch name like `1234-login-form`.
///
/// Branches created by `start` are named `<story-id>-<name>`. The first run of
/// digits followed by `-` anywhere in the name counts, so `ada/1234-login`
/// also matches.
pub fn story_id_from_branch(branch: &str) -> Option<u64> {
    STORY_ID_IN_BRANCH
        .captures(branch)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The git config key holding `key` for `branch`: `branch.<branch>.<key>`.
///
/// Git stores per-branch settings (`branch.<name>.remote`, `.merge`) under the
/// same section, so branch-scoped values live next to them and disappear with
/// `git branch -D`.
pub fn branch_config_key(branch: &str, key: &str) -> String {
    format!("branch.{branch}.{key}")
}
