//! CLI integration tests for stegatool-cli.
//!
//! These tests verify the CLI behavior by running the actual binary
//! and checking outputs, exit codes, and file artifacts.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the stegatool binary.
fn stegatool() -> Command {
    Command::cargo_bin("stegatool").unwrap()
}

fn write_image(dir: &Path, name: &str) {
    RgbImage::from_pixel(160, 60, Rgb([30, 60, 90]))
        .save(dir.join(name))
        .unwrap();
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    stegatool()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("creating and verifying watermarks"))
        .stdout(predicate::str::contains("createwm"))
        .stdout(predicate::str::contains("verifywm"));
}

#[test]
fn test_no_subcommand_prints_help_and_succeeds() {
    stegatool()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("createwm"));
}

#[test]
fn test_version_displays_version() {
    stegatool()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stegatool"));
}

#[test]
fn test_help_shows_exit_codes() {
    stegatool()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("66"))
        .stdout(predicate::str::contains("74"));
}

#[test]
fn test_createwm_help_shows_options() {
    stegatool()
        .args(["createwm", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--inputdir"))
        .stdout(predicate::str::contains("--peoplefile"))
        .stdout(predicate::str::contains("--outputdir"))
        .stdout(predicate::str::contains("--font"));
}

#[test]
fn test_verifywm_help_shows_options() {
    stegatool()
        .args(["verifywm", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--inputdir"))
        .stdout(predicate::str::contains("--key"))
        .stdout(predicate::str::contains("PEOPLEFILE"));
}

// ============================================================================
// Exit Code Tests
// ============================================================================

#[test]
fn test_missing_required_argument_is_usage_error() {
    // Exit code 64 = EX_USAGE
    stegatool()
        .args(["createwm", "-inputdir", "in"])
        .assert()
        .code(64);
}

#[test]
fn test_missing_people_file_returns_input_error() {
    let temp = TempDir::new().unwrap();

    // Exit code 66 = EX_NOINPUT
    stegatool()
        .arg("createwm")
        .arg("-inputdir")
        .arg(temp.path())
        .arg("-peoplefile")
        .arg(temp.path().join("nobody.txt"))
        .arg("-outputdir")
        .arg(temp.path())
        .assert()
        .code(66)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read people file"));
}

#[test]
fn test_missing_input_dir_returns_input_error() {
    let temp = TempDir::new().unwrap();
    let people = temp.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();

    stegatool()
        .arg("createwm")
        .arg("-inputdir")
        .arg(temp.path().join("missing"))
        .arg("-peoplefile")
        .arg(&people)
        .arg("-outputdir")
        .arg(temp.path())
        .assert()
        .code(66)
        .stdout(predicate::str::contains("Watermark key").not());
}

#[test]
fn test_missing_output_dir_returns_io_error() {
    let temp = TempDir::new().unwrap();
    let people = temp.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();
    write_image(temp.path(), "photo.png");

    // Exit code 74 = EX_IOERR
    stegatool()
        .arg("createwm")
        .arg("-inputdir")
        .arg(temp.path())
        .arg("-peoplefile")
        .arg(&people)
        .arg("-outputdir")
        .arg(temp.path().join("missing"))
        .assert()
        .code(74)
        .stdout(predicate::str::contains("Watermark key").not())
        .stderr(predicate::str::contains("Failed to write"));
}

#[test]
fn test_corrupt_image_aborts_issuance() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let people = input.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();
    fs::write(input.path().join("broken.png"), b"not really a png").unwrap();

    // Exit code 65 = EX_DATAERR
    stegatool()
        .arg("createwm")
        .arg("-inputdir")
        .arg(input.path())
        .arg("-peoplefile")
        .arg(&people)
        .arg("-outputdir")
        .arg(output.path())
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Failed to decode image"));
}

#[test]
fn test_invalid_key_returns_usage_error() {
    let temp = TempDir::new().unwrap();
    let people = temp.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();

    stegatool()
        .arg("verifywm")
        .arg("-inputdir")
        .arg(temp.path())
        .arg("-key")
        .arg("not-a-key")
        .arg(&people)
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Invalid -key value"));
}

#[test]
fn test_invalid_font_size_returns_usage_error() {
    let temp = TempDir::new().unwrap();
    let people = temp.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();

    stegatool()
        .arg("createwm")
        .arg("-inputdir")
        .arg(temp.path())
        .arg("-peoplefile")
        .arg(&people)
        .arg("-outputdir")
        .arg(temp.path())
        .args(["-fontsize", "0"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("-fontsize"));
}

#[test]
fn test_missing_font_returns_input_error() {
    let temp = TempDir::new().unwrap();
    let people = temp.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();

    stegatool()
        .arg("createwm")
        .arg("-inputdir")
        .arg(temp.path())
        .arg("-peoplefile")
        .arg(&people)
        .arg("-outputdir")
        .arg(temp.path())
        .arg("-font")
        .arg(temp.path().join("arial.ttf"))
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to load font"));
}

// ============================================================================
// Flag Spelling Tests
// ============================================================================

#[test]
fn test_double_dash_flags_are_accepted() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let people = input.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();
    write_image(input.path(), "photo.png");

    stegatool()
        .arg("createwm")
        .arg("--inputdir")
        .arg(input.path())
        .arg("--peoplefile")
        .arg(&people)
        .arg("--outputdir")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Watermark key: "));

    assert!(output.path().join("photo_alice.png").exists());
}

#[test]
fn test_quiet_suppresses_hint() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let people = input.path().join("people.txt");
    fs::write(&people, "alice\n").unwrap();
    write_image(input.path(), "photo.png");

    stegatool()
        .arg("-q")
        .arg("createwm")
        .arg("-inputdir")
        .arg(input.path())
        .arg("-peoplefile")
        .arg(&people)
        .arg("-outputdir")
        .arg(output.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Store this key").not());
}
