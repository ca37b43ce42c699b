//! Shared fixtures for CLI tests.
//!
//! Every command runs with its own global git config, no system config, a
//! temporary `HOME`, and tracker/GitHub URLs pointing at a closed port so a
//! test can never reach the real services.

use std::path::{Path, PathBuf};
use std::process::Command;

use insta_cmd::get_cargo_bin;
use rstest::fixture;
use tempfile::TempDir;

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Nothing listens here; requests fail fast with a connection error.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

pub struct TestRepo {
    temp_dir: TempDir, // Must keep to ensure cleanup on drop
    root: PathBuf,
    git_config_path: PathBuf,
}

impl TestRepo {
    /// A repository on `main` with one commit.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        // Canonicalize so paths in output match what git reports
        let base = temp_dir.path().canonicalize().unwrap();
        let git_config_path = base.join("test-gitconfig");
        std::fs::write(
            &git_config_path,
            "[user]\n\tname = Test User\n\temail = test@example.com\n\
             [init]\n\tdefaultBranch = main\n",
        )
        .unwrap();
        let root = base.join("repo");
        std::fs::create_dir(&root).unwrap();

        let repo = Self {
            temp_dir,
            root,
            git_config_path,
        };
        repo.git(&["init", "--quiet", "-b", "main"]);
        std::fs::write(repo.root.join("README.md"), "hello\n").unwrap();
        repo.git(&["add", "README.md"]);
        repo.git(&["commit", "--quiet", "-m", "Initial commit"]);
        repo
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    pub fn home_path(&self) -> PathBuf {
        let home = self.temp_dir.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        home
    }

    /// A directory that is not inside any repository.
    pub fn outside_path(&self) -> PathBuf {
        let path = self.temp_dir.path().join("outside");
        std::fs::create_dir_all(&path).unwrap();
        path.canonicalize().unwrap()
    }

    /// Apply the isolated git environment to `cmd`.
    pub fn configure_git_cmd(&self, cmd: &mut Command) {
        cmd.env("GIT_CONFIG_GLOBAL", &self.git_config_path);
        cmd.env("GIT_CONFIG_SYSTEM", NULL_DEVICE);
        cmd.env(
            "GIT_CEILING_DIRECTORIES",
            self.temp_dir.path().canonicalize().unwrap(),
        );
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.env("HOME", self.home_path());
        cmd.env("LC_ALL", "C");
    }

    /// Run git in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.root);
        self.configure_git_cmd(&mut cmd);
        let output = cmd.output().unwrap();
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn local_config(&self, key: &str) -> Option<String> {
        self.config_get("--local", key)
    }

    pub fn global_config(&self, key: &str) -> Option<String> {
        self.config_get("--global", key)
    }

    fn config_get(&self, file: &str, key: &str) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.args(["config", file, "--get", key]).current_dir(&self.root);
        self.configure_git_cmd(&mut cmd);
        let output = cmd.output().unwrap();
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Store every setting the workflow commands would otherwise ask for.
    pub fn configure_workflow(&self) {
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

    /// A `git-pivotal` command running in this repository.
    pub fn command(&self) -> Command {
        let mut cmd = git_pivotal_command();
        self.configure_git_cmd(&mut cmd);
        cmd.current_dir(&self.root);
        cmd
    }
}

#[fixture]
pub fn repo() -> TestRepo {
    TestRepo::new()
}

/// Create a `git-pivotal` command with a standardized test environment.
///
/// - All host `GIT_*` and `GIT_PIVOTAL_*` variables are cleared
/// - Color is off so output can be compared as plain text
/// - Tracker and GitHub URLs point at [`UNREACHABLE_URL`]
#[must_use]
pub fn git_pivotal_command() -> Command {
    let mut cmd = Command::new(get_cargo_bin("git-pivotal"));
    for (key, _) in std::env::vars() {
        if key.starts_with("GIT_") {
            cmd.env_remove(&key);
        }
    }
    cmd.env("NO_COLOR", "1");
    cmd.env("COLUMNS", "80");
    cmd.env("RUST_LOG", "warn");
    cmd.env("GIT_PIVOTAL_TRACKER_URL", UNREACHABLE_URL);
    cmd.env("GIT_PIVOTAL_GITHUB_URL", UNREACHABLE_URL);
    cmd
}
