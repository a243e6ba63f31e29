//! Shared helpers for integration tests

use std::path::PathBuf;
use std::process::Command;

/// Directory holding the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path of one fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Content of one fixture file.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// `audiomark` binary with logging silenced and the config pointed at a
/// file that does not exist.
pub fn audiomark() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("audiomark").expect("audiomark binary");
    cmd.env("AUDIOMARK_LOG", "off")
        .env("AUDIOMARK_CONFIG", "/nonexistent/audiomark/config.toml");
    cmd
}

/// Run the binary and capture (stdout, stderr, exit code).
pub fn run_audiomark(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_audiomark"))
        .args(args)
        .env("AUDIOMARK_LOG", "off")
        .env("AUDIOMARK_CONFIG", "/nonexistent/audiomark/config.toml")
        .output()
        .expect("Failed to execute audiomark");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
