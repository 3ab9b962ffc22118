//! Record-replay round-trip integration test.
//!
//! Records a real process run through the binary (with `echo` standing in
//! for adb), then replays the cassette and checks the output is identical.

use std::process::Command;

fn adbfs() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_adbfs"));
    cmd.env_remove("ADBFS_RECORD").env_remove("ADBFS_REPLAY");
    cmd
}

#[test]
fn record_then_replay_produces_identical_outputs() {
    let dir = std::env::temp_dir().join("adbfs_record_replay_test");
    let _ = std::fs::remove_dir_all(&dir);
    let cassette = dir.join("cat.cassette.yaml");

    // `echo exec-out cat '/x'` exits 0 and prints its arguments, so `cat`
    // succeeds and its stdout is the argument list.
    let recorded = adbfs()
        .args(["--adb", "echo", "cat", "/x"])
        .env("ADBFS_RECORD", &cassette)
        .output()
        .expect("failed to run adbfs binary");
    assert!(recorded.status.success());
    assert_eq!(recorded.stdout, b"exec-out cat '/x'\n");
    assert!(String::from_utf8_lossy(&recorded.stderr).contains("Recording saved to"));

    let loaded = adbfs::cassette::load(&cassette).unwrap();
    assert_eq!(loaded.interactions.len(), 1);
    assert_eq!(loaded.interactions[0].input["program"], "echo");

    for _ in 0..2 {
        let replayed = adbfs()
            .args(["--adb", "/nonexistent/adb", "cat", "/x"])
            .env("ADBFS_REPLAY", &cassette)
            .output()
            .expect("failed to run adbfs binary");
        assert!(replayed.status.success());
        assert_eq!(replayed.stdout, recorded.stdout);
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn recording_and_replaying_together_is_rejected() {
    let output = adbfs()
        .args(["ls"])
        .env("ADBFS_RECORD", "/tmp/a.yaml")
        .env("ADBFS_REPLAY", "/tmp/b.yaml")
        .output()
        .expect("failed to run adbfs binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("mutually exclusive"));
}
