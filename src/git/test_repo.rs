//! Throwaway repositories for unit tests.
//!
//! Every git invocation, ours and the harness's, runs with an isolated global
//! config and no system config, so the host's settings never leak in.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::Repository;

const NULL_DEVICE: &str = if cfg!(windows) { "NUL" } else { "/dev/null" };

pub(crate) struct TestRepo {
    _dir: TempDir,
    root: PathBuf,
}

impl TestRepo {
    /// A repository on `main` with one commit.
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let base = dir.path().canonicalize().unwrap();
        std::fs::write(
            base.join("gitconfig"),
            "[user]\n\tname = Ada Lovelace\n\temail = ada@example.com\n",
        )
        .unwrap();
        let root = base.join("work");
        std::fs::create_dir(&root).unwrap();

        let repo = Self { _dir: dir, root };
        repo.git(&["init", "--quiet", "-b", "main"]);
        repo.commit_file("README.md", "hello\n", "Initial commit");
        repo
    }

    /// Like [`Self::new`], with a bare `origin` that has `main` pushed.
    pub(crate) fn with_remote() -> Self {
        let repo = Self::new();
        let origin = repo.base().join("origin.git");
        repo.git_in(repo.base(), &["init", "--quiet", "--bare", "-b", "main", "origin.git"]);
        repo.git(&["remote", "add", "origin", origin.to_str().unwrap()]);
        repo.git(&["push", "--quiet", "origin", "main"]);
        repo
    }

    fn base(&self) -> &Path {
        self.root.parent().unwrap()
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// A directory inside the temp dir that is not a repository.
    pub(crate) fn outside(&self) -> PathBuf {
        let path = self.base().join("outside");
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    fn env(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("GIT_CONFIG_GLOBAL", self.base().join("gitconfig")),
            ("GIT_CONFIG_SYSTEM", PathBuf::from(NULL_DEVICE)),
            ("GIT_CEILING_DIRECTORIES", self.base().to_path_buf()),
        ]
    }

    pub(crate) fn repository_at(&self, path: &Path) -> Repository {
        self.env()
            .into_iter()
            .fold(Repository::at(path), |repo, (key, value)| repo.with_git_env(key, value))
            .with_git_env("GIT_TERMINAL_PROMPT", "0")
    }

    pub(crate) fn repository(&self) -> Repository {
        self.repository_at(&self.root)
    }

    fn git_in(&self, dir: &Path, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(dir).envs(self.env());
        let output = cmd.output().unwrap();
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Run git in the working tree and return trimmed stdout.
    pub(crate) fn git(&self, args: &[&str]) -> String {
        self.git_in(&self.root, args)
    }

    /// Read a config key from the repository's own file (`--local`).
    pub(crate) fn local_config(&self, key: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--local", "--get", key])
            .current_dir(&self.root)
            .envs(self.env())
            .output()
            .unwrap();
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Read a config key from the isolated global file.
    pub(crate) fn global_config(&self, key: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--global", "--get", key])
            .current_dir(&self.root)
            .envs(self.env())
            .output()
            .unwrap();
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub(crate) fn write_file(&self, name: &str, contents: &str) {
        std::fs::write(self.root.join(name), contents).unwrap();
    }

    pub(crate) fn commit_file(&self, name: &str, contents: &str, message: &str) {
        self.write_file(name, contents);
        self.git(&["add", name]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Set the local settings the workflow commands would otherwise ask for.
    pub(crate) fn configure_workflow(&self) {
        for (key, value) in [
            ("pivotal.main-remote", "origin"),
            ("pivotal.main-branch", "main"),
            ("pivotal.personal-remote", "origin"),
            ("pivotal.api-token", "tracker-token"),
            ("pivotal.project-id", "99"),
            ("github.oauth", "github-token"),
            ("github.org", "acme"),
            ("github.repo", "widgets"),
            ("github.user", "acme"),
            ("github.username", "ada"),
        ] {
            self.git(&["config", "--local", key, value]);
        }
    }
}
