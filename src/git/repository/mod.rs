use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use anyhow::Context;
use once_cell::sync::OnceCell;

use super::GitError;

mod config;
mod working_tree;

pub use working_tree::PullMode;

/// Global base path for repository operations, set by the -C flag
static BASE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global base path for repository operations.
///
/// Called once from main(). Defaults to "." when never called.
pub fn set_base_path(path: PathBuf) {
    BASE_PATH.set(path).ok();
}

fn base_path() -> &'static PathBuf {
    static DEFAULT: OnceLock<PathBuf> = OnceLock::new();
    BASE_PATH
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(|| PathBuf::from(".")))
}

/// Repository context for git operations.
///
/// Every method shells out to `git` with the repository path as working
/// directory. Repository detection is cached for the lifetime of the value;
/// the current branch is not, because `start` switches branches mid-command.
///
/// ```no_run
/// use git_pivotal::git::Repository;
///
/// let repo = Repository::current();
/// let branch = repo.current_branch()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    /// Extra environment for every git invocation (e.g. `GIT_CONFIG_GLOBAL`).
    git_env: Vec<(OsString, OsString)>,
    worktree_root: OnceCell<PathBuf>,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            git_env: Vec::new(),
            worktree_root: OnceCell::new(),
        }
    }

    /// Create a repository context for the current directory (or the -C path).
    pub fn current() -> Self {
        Self::at(base_path().clone())
    }

    /// Set an environment variable on every git command this repository runs.
    pub fn with_git_env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.git_env
            .push((key.as_ref().to_owned(), value.as_ref().to_owned()));
        self
    }

    /// Root of the working tree containing the base path.
    ///
    /// Fails with [`GitError::NotAGitRepository`] outside a working tree
    /// (including inside a bare repository or a `.git` directory).
    pub fn worktree_root(&self) -> anyhow::Result<&Path> {
        self.worktree_root
            .get_or_try_init(|| {
                let not_a_repo = || GitError::NotAGitRepository {
                    path: std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone()),
                };
                if !self.path.is_dir() {
                    return Err(not_a_repo().into());
                }
                let output = self.git_output(&["rev-parse", "--show-toplevel"])?;
                if !output.status.success() {
                    return Err(not_a_repo().into());
                }
                let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok(PathBuf::from(root))
            })
            .map(PathBuf::as_path)
    }

    /// Fail with [`GitError::NotAGitRepository`] unless inside a working tree.
    pub fn ensure_repository(&self) -> anyhow::Result<()> {
        self.worktree_root().map(|_| ())
    }

    /// Get the current branch name, or None if in detached HEAD state.
    pub fn current_branch(&self) -> anyhow::Result<Option<String>> {
        self.ensure_repository()?;
        let stdout = self.run_command(&["branch", "--show-current"])?;
        let branch = stdout.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    /// Get the current branch name, or error if in detached HEAD state.
    ///
    /// `action` describes what requires being on a branch (e.g., "finish").
    pub fn require_current_branch(&self, action: &str) -> anyhow::Result<String> {
        self.current_branch()?.ok_or_else(|| {
            GitError::DetachedHead {
                action: Some(action.into()),
            }
            .into()
        })
    }

    /// The operator's display name from git's `user.name`, if configured.
    pub fn user_name(&self) -> anyhow::Result<Option<String>> {
        self.ensure_repository()?;
        self.config_value(&["config", "--get", "user.name"])
    }

    /// Short label for log lines: the directory name of the base path.
    fn logging_context(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(".")
            .to_string()
    }

    /// Run a git command and return its raw output, whatever the exit status.
    pub(crate) fn git_output(&self, args: &[&str]) -> anyhow::Result<Output> {
        self.git_output_labeled(args, &format!("git {}", args.join(" ")))
    }

    /// Run a git command, showing `shown` instead of the real command line in
    /// logs and errors.
    fn git_output_labeled(&self, args: &[&str], shown: &str) -> anyhow::Result<Output> {
        use crate::shell_exec::run;

        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);
        for (key, value) in &self.git_env {
            cmd.env(key, value);
        }

        run(&mut cmd, Some(&self.logging_context()), shown)
            .with_context(|| format!("Failed to execute: {shown}"))
    }

    /// Run a git command and return stdout, failing with
    /// [`GitError::CommandFailed`] on a non-zero exit.
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        self.run_command_labeled(args, &format!("git {}", args.join(" ")))
    }

    /// [`Self::run_command`] for arguments that must not appear in logs.
    pub(crate) fn run_command_labeled(&self, args: &[&str], shown: &str) -> anyhow::Result<String> {
        let output = self.git_output_labeled(args, shown)?;

        if !output.status.success() {
            // Git uses \r for progress updates
            let stderr = String::from_utf8_lossy(&output.stderr).replace('\r', "\n");
            for line in stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
            // Some git commands print errors to stdout
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            return Err(GitError::CommandFailed {
                command: shown.to_string(),
                error,
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        for line in stdout.trim().lines() {
            log::debug!("  {}", line);
        }
        Ok(stdout)
    }

    /// Run a `git config` read. Exit code 1 means the key is unset.
    fn config_value(&self, args: &[&str]) -> anyhow::Result<Option<String>> {
        let output = self.git_output(args)?;
        match output.status.code() {
            Some(0) => Ok(Some(
                String::from_utf8_lossy(&output.stdout).trim().to_string(),
            )),
            Some(1) => Ok(None),
            _ => Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                error: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into()),
        }
    }
}
