//! Working tree operations used by the workflow commands.

use super::{GitError, Repository};

/// How `pull` integrates the fetched branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    /// `--ff-only`: used when refreshing the base branch before branching off.
    FastForwardOnly,
    /// Merge commit allowed: used to bring the base branch into a topic branch.
    Merge,
}

impl Repository {
    /// Whether tracked files have staged or unstaged changes.
    ///
    /// Untracked files don't count; they survive branch switches untouched.
    pub fn is_dirty(&self) -> anyhow::Result<bool> {
        self.ensure_repository()?;
        let stdout = self.run_command(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(!stdout.trim().is_empty())
    }

    /// Fail with [`GitError::UncommittedChanges`] if the working tree is dirty.
    pub fn ensure_clean_working_tree(&self, action: &str) -> anyhow::Result<()> {
        if self.is_dirty()? {
            return Err(GitError::UncommittedChanges {
                action: Some(action.into()),
            }
            .into());
        }
        Ok(())
    }

    pub fn checkout(&self, branch: &str) -> anyhow::Result<()> {
        self.run_command(&["checkout", "--quiet", branch])?;
        Ok(())
    }

    /// Create `branch` from HEAD and switch to it.
    pub fn create_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.run_command(&["checkout", "--quiet", "-b", branch])?;
        Ok(())
    }

    /// Pull `branch` from `remote` into the current branch.
    pub fn pull(&self, remote: &str, branch: &str, mode: PullMode) -> anyhow::Result<()> {
        // Explicit flags: without them git refuses divergent pulls unless
        // pull.rebase/pull.ff are configured
        let mode_flags: &[&str] = match mode {
            PullMode::FastForwardOnly => &["--ff-only"],
            PullMode::Merge => &["--no-rebase", "--no-edit"],
        };
        let mut args = vec!["pull", "--quiet"];
        args.extend_from_slice(mode_flags);
        args.extend([remote, branch]);
        self.run_command(&args)?;
        Ok(())
    }

    /// Push `branch` to `remote`, setting it as the upstream.
    pub fn push(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        self.run_command(&["push", "--quiet", "--set-upstream", remote, branch])?;
        Ok(())
    }
}
