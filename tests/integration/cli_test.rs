//! Integration tests for the audiomark CLI

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{audiomark, fixture_path, run_audiomark};

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_audiomark(&["--help"]);

    assert_eq!(exit_code, 0);
    for name in ["parse", "time", "seek", "config", "completions"] {
        assert!(stdout.contains(name), "missing {} in help", name);
    }
}

#[test]
fn parse_without_file_is_a_usage_error() {
    let (_stdout, stderr, exit_code) = run_audiomark(&["parse"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<FILE>"));
}

// ============================================================================
// parse
// ============================================================================

#[test]
fn parse_lrc_prints_bookmark_items() {
    let file = fixture_path("song.lrc");
    let (stdout, _stderr, exit_code) = run_audiomark(&["parse", file.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r"
    00:17.020 --- hello
    00:22.220 --- world
    01:05.500 --- last line
    ");
}

#[test]
fn parse_srt_drops_hours_and_keeps_multiline_text() {
    audiomark()
        .arg("parse")
        .arg(fixture_path("interview.srt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00.002-00:02.669 --- line one\n"))
        .stdout(predicate::str::contains(
            "00:17.198-00:19.634 --- line two\nsecond row\n",
        ))
        .stdout(predicate::str::contains("broken timing").not());
}

#[test]
fn parse_vtt_uses_subtitle_dialect() {
    let file = fixture_path("talk.vtt");
    let (stdout, _stderr, exit_code) = run_audiomark(&["parse", file.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r"
    00:01.000-00:04.000 --- Welcome to the talk.
    01:02.500-01:05.000 --- First question.
    ");
}

#[test]
fn parse_json_emits_tagged_entries() {
    let output = audiomark()
        .args(["parse", "--json"])
        .arg(fixture_path("interview.srt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["format"], "srt");
    assert_eq!(value["entries"].as_array().unwrap().len(), 2);
    assert_eq!(value["entries"][0]["start"], "00:00.002");
    assert_eq!(value["entries"][0]["end"], "00:02.669");
    assert_eq!(value["entries"][1]["text"], "line two\nsecond row");
}

#[test]
fn parse_unknown_extension_sniffs_content() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("lyrics.txt");
    std::fs::write(&file, "[00:01.00]one\n[00:02.50]two\n").unwrap();

    audiomark()
        .arg("parse")
        .arg(&file)
        .assert()
        .success()
        .stdout("00:01.000 --- one\n00:02.500 --- two\n");
}

#[test]
fn parse_plain_text_reports_no_entries() {
    audiomark()
        .arg("parse")
        .arg(fixture_path("notes.txt"))
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No entries found"));
}

#[test]
fn parse_forced_format_ignores_extension() {
    let output = audiomark()
        .args(["parse", "--json", "--format", "lrc"])
        .arg(fixture_path("interview.srt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["format"], "lrc");
    assert!(value["entries"].as_array().unwrap().is_empty());
}

#[test]
fn parse_missing_file_fails() {
    audiomark()
        .args(["parse", "/nonexistent/song.lrc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

// ============================================================================
// time
// ============================================================================

#[test]
fn time_format_pads_and_clamps() {
    audiomark()
        .args(["time", "format", "65"])
        .assert()
        .success()
        .stdout("01:05.000\n");
    audiomark()
        .args(["time", "format", "-3"])
        .assert()
        .success()
        .stdout("00:00.000\n");
}

#[test]
fn time_parse_accepts_subtitle_form() {
    audiomark()
        .args(["time", "parse", "00:00:17,198"])
        .assert()
        .success()
        .stdout("17.198\n");
}

#[test]
fn time_parse_rejects_text() {
    audiomark()
        .args(["time", "parse", "Chapter 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a timestamp"));
}

// ============================================================================
// seek
// ============================================================================

#[test]
fn seek_slot_write_read_clear() {
    let dir = TempDir::new().unwrap();
    let slot = dir.path().join("state").join("seek-request");

    audiomark()
        .args(["seek", "write", "00:42.500", "--lines", "12:18", "--slot"])
        .arg(&slot)
        .assert()
        .success()
        .stdout("12:18:42.5\n");
    assert_eq!(std::fs::read_to_string(&slot).unwrap(), "12:18:42.5");

    audiomark()
        .args(["seek", "read", "--slot"])
        .arg(&slot)
        .assert()
        .success()
        .stdout("12:18:42.5\n");

    audiomark()
        .args(["seek", "clear", "--slot"])
        .arg(&slot)
        .assert()
        .success();

    audiomark()
        .args(["seek", "read", "--slot"])
        .arg(&slot)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn seek_write_without_lines_is_a_hover_request() {
    let dir = TempDir::new().unwrap();
    let slot = dir.path().join("seek-request");

    audiomark()
        .args(["seek", "write", "17.02", "--slot"])
        .arg(&slot)
        .assert()
        .success()
        .stdout("::17.02\n");
}

#[test]
fn seek_write_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let slot = dir.path().join("seek-request");

    audiomark()
        .args(["seek", "write", "later", "--slot"])
        .arg(&slot)
        .assert()
        .failure();
    audiomark()
        .args(["seek", "write", "00:01.000", "--lines", "12", "--slot"])
        .arg(&slot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("START:END"));
    assert!(!slot.exists());
}

#[test]
fn seek_uses_configured_slot() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let slot = dir.path().join("custom-slot");
    std::fs::write(
        &config,
        format!("[storage]\nseek_slot = {:?}\n", slot.to_str().unwrap()),
    )
    .unwrap();

    audiomark()
        .env("AUDIOMARK_CONFIG", &config)
        .args(["seek", "write", "01:00.000"])
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&slot).unwrap(), "::60");
}

// ============================================================================
// config / completions
// ============================================================================

#[test]
fn config_path_honors_env_override() {
    audiomark()
        .env("AUDIOMARK_CONFIG", "/tmp/elsewhere/config.toml")
        .args(["config", "path"])
        .assert()
        .success()
        .stdout("/tmp/elsewhere/config.toml\n");
}

#[test]
fn config_show_merges_file_with_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[player]\nvolume = 0.8\n").unwrap();

    audiomark()
        .env("AUDIOMARK_CONFIG", &config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("volume = 0.8"))
        .stdout(predicate::str::contains("seek_step_secs = 5.0"));
}

#[test]
fn config_show_reports_invalid_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[player\n").unwrap();

    audiomark()
        .env("AUDIOMARK_CONFIG", &config)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn completions_generate_for_bash() {
    audiomark()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("audiomark"));
}
