//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;

use adbfs::cassette::recorder::CassetteRecorder;

fn run_adbfs(args: &[&str], replay: Option<&Path>) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_adbfs");
    let mut cmd = Command::new(bin);
    cmd.args(args).env_remove("ADBFS_RECORD").env_remove("ADBFS_REPLAY");
    if let Some(path) = replay {
        cmd.env("ADBFS_REPLAY", path);
    }
    cmd.output().expect("failed to run adbfs binary")
}

fn stdout_reply(stdout: &[u8]) -> serde_json::Value {
    json!({"Ok": {"exit_code": 0, "stdout": stdout, "stderr": []}})
}

/// Writes a cassette answering `stat /sdcard` then `ls /sdcard`.
fn sdcard_cassette(name: &str, listing: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("adbfs_cli_{name}"));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sdcard.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&path, name);
    recorder.record(
        "shell",
        "run",
        json!({"program": "adb", "args": ["shell", "ls", "-l", "-d", "'/sdcard'"]}),
        stdout_reply(b"drwxrwx--x 4 root sdcard_rw 4096 2021-03-04 09:15 /sdcard\n"),
    );
    recorder.record(
        "shell",
        "run",
        json!({"program": "adb", "args": ["shell", "ls", "-l", "-a", "'/sdcard/'"]}),
        stdout_reply(listing),
    );
    recorder.finish().unwrap()
}

#[test]
fn ls_prints_utf8_names_unchanged() {
    let listing = "drwxrwx--x 2 root sdcard_rw 4096 2021-03-04 09:15 Γεια σας\n\
                   -rw-rw---- 1 root sdcard_rw 7 2021-03-04 09:15 こんにちは。\n";
    let cassette = sdcard_cassette("utf8", listing.as_bytes());

    let output = run_adbfs(&["ls", "/sdcard"], Some(&cassette));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success());
    assert!(stdout.contains(" Γεια σας\n"));
    assert!(stdout.contains(" こんにちは。\n"));
}

#[test]
fn ls_falls_back_to_latin1_for_stray_byte() {
    let listing = b"-rw-rw----  1 0  1015  0 01/01/2010 22:11:01 /storage/emulated/0/\xe2\n";
    let cassette = sdcard_cassette("latin1", listing);

    let output = run_adbfs(&["ls", "/sdcard"], Some(&cassette));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success());
    assert!(stdout.trim_end().ends_with(" \u{e2}"));
}

#[test]
fn missing_adb_binary_is_reported() {
    let output = run_adbfs(&["--adb", "/nonexistent/adb", "ls", "/sdcard"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("failed to run /nonexistent/adb"));
}

#[test]
fn help_lists_subcommands() {
    let output = run_adbfs(&["--help"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("ls"));
    assert!(stdout.contains("stat"));
    assert!(stdout.contains("cat"));
}

#[test]
fn version_goes_to_stdout() {
    let output = run_adbfs(&["--version"], None);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("adbfs "));
    assert!(output.stderr.is_empty());
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_adbfs(&["nonsense"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
