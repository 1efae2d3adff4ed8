//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and that the
//! offline subcommands produce their expected output.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `streamscout` binary.
fn streamscout() -> Command {
    Command::cargo_bin("streamscout").expect("binary 'streamscout' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    streamscout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: streamscout"))
        .stdout(predicate::str::contains("sources"))
        .stdout(predicate::str::contains("providers"));
}

#[test]
fn version_flag_shows_semver() {
    streamscout()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^streamscout \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn missing_subcommand_fails_with_usage() {
    streamscout()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ─── providers subcommand (offline) ──────────────────────────────────────────

#[test]
fn providers_lists_the_full_registry() {
    streamscout()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidsrc"))
        .stdout(predicate::str::contains("dreamfilm"))
        .stdout(predicate::str::contains("filecdn"))
        .stdout(predicate::str::contains("frembed"))
        .stdout(predicate::str::contains("twoembed"))
        .stdout(predicate::str::contains("meinecloud"))
        .stdout(predicate::str::contains("azmto"));
}

// ─── sources argument validation ─────────────────────────────────────────────

#[test]
fn sources_requires_a_media_id() {
    streamscout()
        .arg("sources")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MEDIA_ID"));
}

#[test]
fn season_without_episode_is_rejected() {
    streamscout()
        .args(["sources", "1396", "--season", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--episode"));
}

#[test]
fn episode_without_season_is_rejected() {
    streamscout()
        .args(["sources", "1396", "--episode", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--season"));
}
