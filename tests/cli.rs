mod common;

use assert_cmd::Command;
use predicates::prelude::*;

const VERDICT_LINE: &str = r"^(on task|off task)\n$";

const USAGE: &str = "Error: Missing arguments. Usage: ontask <text> <activityDescription>";

fn ontask() -> Command {
    let mut cmd = Command::cargo_bin("ontask").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    ontask()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(USAGE));
}

#[test]
fn one_argument_prints_usage_and_exits_1() {
    ontask()
        .arg("I am watching cat videos")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(USAGE));
}

#[test]
fn usage_error_does_not_touch_the_model() {
    // A model path that cannot load would fail differently if it were tried.
    ontask()
        .args(["--model", "/nonexistent/checkpoint", "only one"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(USAGE))
        .stderr(predicate::str::contains("failed to load model").not());
}

#[test]
fn model_load_failure_exits_nonzero_without_verdict() {
    let dir = tempfile::tempdir().unwrap();

    ontask()
        .args(["--model", dir.path().to_str().unwrap()])
        .args(["I am watching cat videos", "write a history essay", "extra"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to load model"))
        .stderr(predicate::str::contains("config.json"));
}

#[test]
fn help_lists_model_option() {
    ontask()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--model"));
}

#[test]
fn bulleted_screen_text_reaches_the_model() {
    let dir = tempfile::tempdir().unwrap();

    ontask()
        .args(["--model", dir.path().to_str().unwrap()])
        .args(["- buy milk\n- email boss", "write a history essay"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load model"))
        .stderr(predicate::str::contains(USAGE).not())
        .stderr(predicate::str::contains("unexpected argument").not());
}

#[test]
fn activity_spelled_like_a_flag_reaches_the_model() {
    let dir = tempfile::tempdir().unwrap();

    ontask()
        .args(["--model", dir.path().to_str().unwrap(), "some screen", "-v"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load model"))
        .stderr(predicate::str::contains(USAGE).not());
}

#[test]
fn successful_run_prints_only_the_verdict() {
    let dir = tempfile::tempdir().unwrap();
    common::write_tiny_distilbert(dir.path(), 64);

    ontask()
        .args(["--model", dir.path().to_str().unwrap()])
        .args(["- buy milk\n- email boss", "write a history essay"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(VERDICT_LINE).unwrap())
        .stderr(predicate::str::is_empty());
}

#[test]
fn flag_like_activity_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    common::write_tiny_distilbert(dir.path(), 64);

    ontask()
        .args(["--model", dir.path().to_str().unwrap(), "some screen", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(VERDICT_LINE).unwrap())
        .stderr(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn non_utf8_screen_text_is_classified() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let dir = tempfile::tempdir().unwrap();
    common::write_tiny_distilbert(dir.path(), 64);

    ontask()
        .args(["--model", dir.path().to_str().unwrap()])
        .arg(OsString::from_vec(b"buy \xffmilk".to_vec()))
        .arg("write a history essay")
        .assert()
        .success()
        .stdout(predicate::str::is_match(VERDICT_LINE).unwrap());
}
