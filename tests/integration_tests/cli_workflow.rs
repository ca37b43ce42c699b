//! The workflow commands up to the point where they would talk to a service.
//!
//! Tracker and GitHub URLs point at a closed port, so these cover the checks
//! and prompts that run first, plus how service failures are reported.

use crate::common::{TestRepo, repo};
use rstest::rstest;

fn run(repo: &TestRepo, args: &[&str]) -> (Option<i32>, String) {
    let output = repo.command().args(args).output().unwrap();
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[rstest]
fn test_reminder_without_story(repo: TestRepo) {
    repo.configure_workflow();
    let (code, err) = run(&repo, &["reminder"]);
    assert_eq!(code, Some(1));
    assert!(err.contains("No story associated with branch main"), "{err}");
    assert!(err.contains("git-pivotal config set story-id"), "{err}");
}

#[rstest]
fn test_reminder_reports_tracker_failure(repo: TestRepo) {
    repo.configure_workflow();
    repo.git(&["checkout", "--quiet", "-b", "555-login"]);
    let (code, err) = run(&repo, &["reminder"]);
    assert_eq!(code, Some(1));
    assert!(err.contains("Pivotal Tracker:"), "{err}");
    assert!(err.contains("failed"), "{err}");
}

#[rstest]
fn test_start_refuses_dirty_tree(repo: TestRepo) {
    repo.configure_workflow();
    std::fs::write(repo.root_path().join("README.md"), "edited\n").unwrap();
    let (code, err) = run(&repo, &["start"]);
    assert_eq!(code, Some(1));
    assert!(
        err.contains("Cannot start a story: working tree has uncommitted changes"),
        "{err}"
    );
    assert_eq!(repo.git(&["branch", "--show-current"]), "main");
}

#[rstest]
fn test_start_asks_for_token_first(repo: TestRepo) {
    let (code, err) = run(&repo, &["start", "bug"]);
    assert_eq!(code, Some(1));
    assert!(err.contains("Pivotal API Token"), "{err}");
    assert!(err.contains("Input required but no terminal is attached"), "{err}");
}

#[rstest]
fn test_start_without_reachable_projects(repo: TestRepo) {
    repo.configure_workflow();
    repo.git(&["config", "--local", "--unset", "pivotal.project-id"]);
    let (code, err) = run(&repo, &["start"]);
    assert_eq!(code, Some(1));
    assert!(
        err.contains("No Pivotal Tracker projects available for this API token"),
        "{err}"
    );
    // The connection failure behind the empty list is shown too
    assert!(err.contains("listing projects failed"), "{err}");
    assert_eq!(repo.local_config("pivotal.project-id"), None);
}

#[rstest]
fn test_finish_detached_head(repo: TestRepo) {
    repo.configure_workflow();
    repo.git(&["checkout", "--quiet", "--detach"]);
    let (code, err) = run(&repo, &["finish"]);
    assert_eq!(code, Some(1));
    assert!(
        err.contains("Cannot finish a story: not on a branch (detached HEAD)"),
        "{err}"
    );
}

#[rstest]
fn test_finish_without_story(repo: TestRepo) {
    repo.configure_workflow();
    repo.git(&["checkout", "--quiet", "-b", "cleanup"]);
    let (code, err) = run(&repo, &["finish", "--no-complete"]);
    assert_eq!(code, Some(1));
    assert!(err.contains("No story associated with branch cleanup"), "{err}");
}

#[rstest]
fn test_verbose_logs_git_commands(repo: TestRepo) {
    repo.configure_workflow();
    let output = repo
        .command()
        .env_remove("RUST_LOG")
        .args(["-vv", "config", "get", "base-branch"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("[debug] $ git"), "{err}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "main");
}

#[rstest]
fn test_config_writes_never_log_values(repo: TestRepo) {
    let output = repo
        .command()
        .env_remove("RUST_LOG")
        .args(["-vv", "config", "set", "github-token", "ghp_secret_value_1234"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("git config --local github.oauth <value>"), "{err}");
    assert!(!err.contains("ghp_secret_value_1234"), "{err}");
}
