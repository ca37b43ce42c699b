use crate::common::{TestRepo, git_pivotal_command, repo};
use insta_cmd::assert_cmd_snapshot;
use rstest::rstest;

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[rstest]
fn test_config_show(repo: TestRepo) {
    repo.configure_workflow();
    let mut cmd = repo.command();
    cmd.args(["config", "show"]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    SETTINGS  stored in git config
      base-remote      pivotal.main-remote      local     -> local   origin
      base-branch      pivotal.main-branch      local     -> local   main
      personal-remote  pivotal.personal-remote  local     -> local   origin
      github-token     github.oauth             local     -> local   ****oken
      github-org       github.org               local     -> local   acme
      github-repo      github.repo              local     -> local   widgets
      github-user      github.user              local     -> local   acme
      github-username  github.username          local     -> local   ada
      api-token        pivotal.api-token        inherited -> local   ****oken
      project-id       pivotal.project-id       inherited -> local   99
      full-name        pivotal.full-name        local     -> local   (not set)
      story-id         pivotal-story-id         branch    -> branch  (not set)

    ----- stderr -----
    ");
}

#[rstest]
fn test_config_show_never_prompts(repo: TestRepo) {
    // stdin is closed; any prompt would fail the command
    let output = repo.command().args(["config", "show"]).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("(not set)"));
}

#[rstest]
fn test_config_get_stored_value(repo: TestRepo) {
    repo.configure_workflow();
    let mut cmd = repo.command();
    cmd.args(["config", "get", "base-branch"]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    main

    ----- stderr -----
    ");
}

#[rstest]
fn test_config_get_global_token_inherited(repo: TestRepo) {
    repo.git(&["config", "--global", "pivotal.api-token", "from-global"]);
    let output = repo
        .command()
        .args(["config", "get", "api-token"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "from-global");
}

#[rstest]
fn test_config_get_unset_without_terminal(repo: TestRepo) {
    let output = repo
        .command()
        .args(["config", "get", "base-remote"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("What remote should I pull from to start a new branch?"), "{err}");
    assert!(err.contains("Input required but no terminal is attached"), "{err}");
    assert_eq!(repo.local_config("pivotal.main-remote"), None);
}

#[rstest]
fn test_config_set_local(repo: TestRepo) {
    let mut cmd = repo.command();
    cmd.args(["config", "set", "base-branch", " develop "]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ✓ Set pivotal.main-branch to develop (local)
    ");
    assert_eq!(repo.local_config("pivotal.main-branch").as_deref(), Some("develop"));
}

#[rstest]
fn test_config_set_global_masks_token(repo: TestRepo) {
    let output = repo
        .command()
        .args(["config", "set", "api-token", "0123456789abcdef", "--global"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("****cdef (global)"));
    assert!(!stderr(&output).contains("0123456789abcdef"));
    assert_eq!(
        repo.global_config("pivotal.api-token").as_deref(),
        Some("0123456789abcdef")
    );
    assert_eq!(repo.local_config("pivotal.api-token"), None);
}

#[rstest]
fn test_config_set_story_id_on_branch(repo: TestRepo) {
    repo.git(&["checkout", "--quiet", "-b", "login-form"]);
    let output = repo
        .command()
        .args(["config", "set", "story-id", "123456"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        repo.local_config("branch.login-form.pivotal-story-id").as_deref(),
        Some("123456")
    );

    // Not visible from another branch
    repo.git(&["checkout", "--quiet", "main"]);
    let output = repo
        .command()
        .args(["config", "get", "story-id"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "");
}

#[rstest]
fn test_config_set_story_id_globally_rejected(repo: TestRepo) {
    let output = repo
        .command()
        .args(["config", "set", "story-id", "123", "--global"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("stored per branch"));
    assert_eq!(repo.global_config("pivotal-story-id"), None);
}

#[rstest]
fn test_config_set_invalid_project_id(repo: TestRepo) {
    let output = repo
        .command()
        .args(["config", "set", "project-id", "abc"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Invalid value for project-id"), "{err}");
    assert!(err.contains("git-pivotal config set project-id <value>"), "{err}");
    assert_eq!(repo.local_config("pivotal.project-id"), None);
}

#[rstest]
fn test_config_set_unknown_setting(repo: TestRepo) {
    let output = repo
        .command()
        .args(["config", "set", "colour", "blue"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid value 'colour'"));
}

#[rstest]
fn test_config_outside_repository(repo: TestRepo) {
    let outside = repo.outside_path();
    let mut cmd = repo.command();
    cmd.current_dir(&outside).args(["config", "get", "base-remote"]);
    let output = cmd.output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Not a git repository"), "{err}");
    // Fails before asking for anything
    assert!(!err.contains("What remote"), "{err}");
}

#[rstest]
fn test_directory_flag(repo: TestRepo) {
    repo.configure_workflow();
    let mut cmd = git_pivotal_command();
    repo.configure_git_cmd(&mut cmd);
    cmd.current_dir(repo.outside_path())
        .arg("-C")
        .arg(repo.root_path())
        .args(["config", "get", "github-repo"]);
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "widgets");
}
