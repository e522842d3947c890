//! Alias registry tests through the wtsrc binary
#![cfg(unix)]

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_add_list_and_init_by_alias() {
    let workspace = TestWorkspace::new();
    let outside = workspace.outside();

    workspace
        .wtsrc_in(&outside)
        .args(["add-alias", "core", "--url", "git@example.com:team/manifest.git"])
        .assert()
        .success();
    workspace
        .wtsrc_in(&outside)
        .args(["add-alias", "platform_v2", "-u", "https://example.com/platform.git"])
        .assert()
        .success();

    workspace
        .wtsrc_in(&outside)
        .arg("aliases")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "File: {}\nAliases:\n",
            workspace.alias_file().display()
        )))
        .stdout(predicate::str::contains(
            "  core        => git@example.com:team/manifest.git",
        ))
        .stdout(predicate::str::contains(
            "  platform_v2 => https://example.com/platform.git",
        ));

    workspace
        .wtsrc_in(&outside)
        .args(["init-alias", "core", "--group", "backend", "-s"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "tsrc init git@example.com:team/manifest.git --group backend -s",
        ));

    let content = std::fs::read_to_string(workspace.alias_file()).unwrap();
    assert!(content.starts_with("aliases:"));
}

#[test]
fn test_invalid_alias_name_is_rejected() {
    let workspace = TestWorkspace::new();

    workspace
        .wtsrc()
        .args(["add-alias", "my-alias", "--url", "url"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'my-alias' is not a valid alias"));

    assert!(!workspace.alias_file().exists());
}

#[test]
fn test_duplicate_alias_is_rejected() {
    let workspace = TestWorkspace::new();

    workspace
        .wtsrc()
        .args(["add-alias", "core", "--url", "first"])
        .assert()
        .success();
    workspace
        .wtsrc()
        .args(["add-alias", "core", "--url", "second"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Alias 'core' already exists"));
}

#[test]
fn test_unknown_alias_is_fatal_for_init() {
    let workspace = TestWorkspace::new();

    workspace
        .wtsrc()
        .args(["init-alias", "nope"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("tsrc init").not())
        .stderr(predicate::str::contains("The alias 'nope' is not known"));
}

#[test]
fn test_remove_alias() {
    let workspace = TestWorkspace::new();

    workspace
        .wtsrc()
        .args(["add-alias", "core", "--url", "url"])
        .assert()
        .success();
    workspace.wtsrc().args(["remove-alias", "core"]).assert().success();
    workspace
        .wtsrc()
        .arg("aliases")
        .assert()
        .success()
        .stdout(predicate::str::contains("core").not());

    workspace
        .wtsrc()
        .args(["remove-alias", "core"])
        .assert()
        .success()
        .stderr(predicate::str::contains("The alias 'core' is not known"));
}

#[test]
fn test_alias_commands_never_run_hooks() {
    let workspace = TestWorkspace::with_project(
        "commands:\n  aliases:\n    pre: \"touch pre-ran\"\n    post: \"touch post-ran\"\nactions: {}\n",
    );

    workspace.wtsrc().arg("aliases").assert().success();

    assert!(workspace.manifest_file("pre-ran").is_none());
    assert!(workspace.manifest_file("post-ran").is_none());
}
