use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("brainfk").unwrap();
    cmd.env("BRAINFK_CONFIG", "/nonexistent/brainfk.toml")
        .env_remove("BRAINFK_LOG")
        .timeout(Duration::from_secs(5));
    cmd
}

fn source(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn test_unclosed_loop_error() {
    let tf = source("[+");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("brainfk: loop doesn't close"));
}

#[test]
fn test_stray_close_bracket_error() {
    let tf = source("+]");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("illegal expression ']'"))
        .stderr(predicate::str::contains("  +]\n   ^"));
}

#[test]
fn test_output_before_error_is_kept() {
    let tf = source("++++++++[>++++++++<-]>+.]");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stdout("A")
        .stderr(predicate::str::contains("illegal expression"));
}

#[test]
fn test_only_comments_is_empty_program() {
    let tf = source("// nothing to run here\n\nhello there\n");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("contains no valid brainfuck code"));
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin()
        .arg(dir.path().join("missing.bf"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("doesn't exist"));
}

#[test]
fn test_directory_source() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin()
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a regular file"));
}

#[test]
fn test_zero_byte_source() {
    let tf = source("");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("empty source"));
}

#[test]
fn test_missing_path_argument_is_usage_error() {
    cargo_bin().assert().code(2);
}

#[test]
fn test_zero_tape_len_is_usage_error() {
    let tf = source("+");
    cargo_bin()
        .arg("--tape-len")
        .arg("0")
        .arg(tf.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tape length must be at least 1"));
}
