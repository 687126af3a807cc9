// Copyright (c) 2016-2021 Fabian Schuiki

//! Tests that drive the `boolnet` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Run the binary with `args`, feeding `input` on stdin.
fn run(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_boolnet"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should start");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Write `content` to a file in the temporary directory.
fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("boolnet-{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn prints_trees() {
    let output = run(&["-"], "(& a (! $b))\n; trailing comment\nc\n");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(stdout(&output), "(& a (! $b))\nc\n");
}

#[test]
fn reads_files() {
    let path = temp_file("reads.bn", "(| x $y)\n");
    let output = run(&[path.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(stdout(&output), "(| x $y)\n");
}

#[test]
fn missing_file_fails() {
    let output = run(&["/this/path/points/nowhere.bn"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unable to open input file"));
}

#[test]
fn parse_error_fails() {
    let path = temp_file("broken.bn", "(module\n  (& a))\n");
    let output = run(&[path.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("and expects 2 operands, found 1"), "{}", err);
    assert!(err.contains("broken.bn:2:3"), "{}", err);
}

#[test]
fn deep_nesting_fails_cleanly() {
    let input = format!("{}a{}", "(! ".repeat(50_000), ")".repeat(50_000));
    let output = run(&["-"], &input);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("expression nested too deeply"));
}

#[test]
fn check_rejects_malformed_names() {
    let input = "(& a $9x)\n";
    let output = run(&["--check", "-"], input);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("malformed identifier `9x` for symbol"), "{}", err);

    // Without the check the same tree passes through.
    let output = run(&["-"], input);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "(& a $9x)\n");
}

#[test]
fn check_accepts_well_formed_names() {
    let output = run(&["--check", "-"], "(let data[3] (! $carry.in))\n");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(stdout(&output), "(let data[3] (! $carry.in))\n");
}

#[test]
fn wrap_builds_a_module() {
    let output = run(&["--wrap", "-"], "(let t (& a b))\n(! $t)\n");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(stdout(&output), "(module (let t (& a b)) (! $t))\n");

    let output = run(&["--wrap", "-"], "");
    assert_eq!(stdout(&output), "(module)\n");
}

#[test]
fn emit_formats() {
    let output = run(&["--emit", "flat", "-"], "(& a a)");
    assert_eq!(stdout(&output), "_0 = a\n_1 = & _0 _0\n");

    let output = run(&["--emit", "pretty", "--width", "10", "-"], "(| carry_in b)");
    assert_eq!(stdout(&output), "(|\n  carry_in\n  b)\n");

    let output = run(&["--emit", "json", "-"], "(! $s)");
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["kind"], "Not");
}

#[test]
fn invalid_width_is_rejected() {
    let output = run(&["--emit", "pretty", "--width", "wide", "-"], "a");
    assert_ne!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("invalid value for 'width'"));
}
