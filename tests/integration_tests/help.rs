use crate::common::git_pivotal_command;

#[test]
fn test_help_lists_commands() {
    let output = git_pivotal_command().arg("--help").output().unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for command in ["start", "finish", "reminder", "config"] {
        assert!(help.contains(command), "missing {command} in:\n{help}");
    }
    assert!(help.contains("Global Options"));
}

#[test]
fn test_config_get_help_lists_settings() {
    let output = git_pivotal_command()
        .args(["config", "get", "--help"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for setting in ["base-remote", "api-token", "project-id", "story-id"] {
        assert!(help.contains(setting), "missing {setting} in:\n{help}");
    }
}

#[test]
fn test_missing_subcommand() {
    let output = git_pivotal_command().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}
