#![allow(clippy::unwrap_used)]
// End-to-end tests for the `nearcare` binary. No network access: the
// builtin directory plus explicit coordinates cover every path.

use assert_cmd::Command;
use predicates::prelude::*;

fn nearcare() -> Command {
    let mut cmd = Command::cargo_bin("nearcare").unwrap();
    // Point at a nonexistent config so the host environment never leaks in.
    cmd.env("NEARCARE_CONFIG", "/nonexistent/nearcare.toml");
    cmd
}

// ── facilities ──────────────────────────────────────────────────────

#[test]
fn facilities_list_shows_the_builtin_directory() {
    nearcare()
        .args(["facilities", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ruby Hall Clinic"))
        .stdout(predicate::str::contains("Noble Hospital"));
}

#[test]
fn facilities_list_search_narrows_by_substring() {
    nearcare()
        .args(["facilities", "list", "--search", "sassoon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ruby Hall Clinic"))
        .stdout(predicate::str::contains("Jehangir Hospital"))
        .stdout(predicate::str::contains("Noble Hospital").not());
}

#[test]
fn facilities_list_no_match_is_empty_but_successful() {
    nearcare()
        .args(["facilities", "list", "--search", "zzz-no-such-place", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn facilities_show_is_case_insensitive() {
    nearcare()
        .args(["facilities", "show", "ruby hall clinic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sassoon Rd"));
}

#[test]
fn facilities_show_unknown_name_exits_not_found() {
    nearcare()
        .args(["facilities", "show", "No Such Place"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("No facility named"));
}

// ── nearest ─────────────────────────────────────────────────────────

#[test]
fn nearest_with_explicit_coordinates_ranks_ascending() {
    // User standing at the Loni Kalbhor PHC: it comes first, the
    // Theur clinic (~0.4 km) second.
    nearcare()
        .args([
            "nearest", "--lat", "18.4556", "--lng", "74.0219", "--limit", "3", "-o", "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"(?s)^Loni Kalbhor Primary Health Centre\nTheur Phata Rural Clinic\n",
        ).unwrap());
}

#[test]
fn nearest_limit_caps_the_output() {
    nearcare()
        .args(["nearest", "--lat", "18.52", "--lng", "73.85", "-n", "2", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::function(|s: &str| {
            s.lines().filter(|l| !l.is_empty()).count() == 2
        }));
}

#[test]
fn nearest_search_filters_the_ranked_list() {
    nearcare()
        .args([
            "nearest", "--lat", "18.52", "--lng", "73.85", "--search", "diagnostics", "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Apollo Diagnostics Kothrud"))
        .stdout(predicate::function(|s: &str| s.lines().count() <= 2));
}

#[test]
fn nearest_rejects_out_of_range_coordinates() {
    nearcare()
        .args(["nearest", "--lat", "95.0", "--lng", "0.0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("coordinate"));
}

#[test]
fn nearest_without_a_position_is_a_usage_error() {
    nearcare()
        .args(["nearest"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--locate"));
}

#[test]
fn nearest_json_output_carries_distances() {
    let output = nearcare()
        .args([
            "nearest", "--lat", "18.4556", "--lng", "74.0219", "--limit", "2", "-o", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0]["name"].as_str().unwrap(),
        "Loni Kalbhor Primary Health Centre"
    );
    assert!(rows[0]["distance_km"].as_f64().unwrap() < 0.001);
    let second = rows[1]["distance_km"].as_f64().unwrap();
    assert!((0.35..=0.45).contains(&second), "got {second}");
}

// ── distance ────────────────────────────────────────────────────────

#[test]
fn distance_plain_emits_kilometres() {
    nearcare()
        .args([
            "distance", "18.4556,74.0219", "18.5244,73.8413", "-o", "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^20\.\d+\n$").unwrap());
}

#[test]
fn distance_rejects_malformed_pairs() {
    nearcare()
        .args(["distance", "18.4556", "18.5244,73.8413"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("lat,lng"));
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn config_init_and_show_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path_str = path.to_str().unwrap();

    Command::cargo_bin("nearcare")
        .unwrap()
        .args(["--config", path_str, "config", "init"])
        .assert()
        .success();

    // Refuses to overwrite without --force.
    Command::cargo_bin("nearcare")
        .unwrap()
        .args(["--config", path_str, "config", "init"])
        .assert()
        .failure()
        .code(2);

    Command::cargo_bin("nearcare")
        .unwrap()
        .args(["--config", path_str, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provider = \"ip\""));
}

#[test]
fn invalid_config_fails_fast_with_the_field_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[locator]\nprovider = \"gps\"\n").unwrap();

    Command::cargo_bin("nearcare")
        .unwrap()
        .args(["--config", path.to_str().unwrap(), "nearest", "--locate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locator.provider"));
}

// ── locate via fixed provider (no network) ──────────────────────────

#[test]
fn nearest_locate_uses_the_configured_fixed_provider() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[locator]\nprovider = \"fixed\"\nfixed_lat = 18.4556\nfixed_lng = 74.0219\n",
    )
    .unwrap();

    Command::cargo_bin("nearcare")
        .unwrap()
        .args([
            "--config",
            path.to_str().unwrap(),
            "nearest",
            "--locate",
            "--limit",
            "1",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loni Kalbhor Primary Health Centre"));
}

#[test]
fn nearest_locate_with_provider_off_is_denied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[locator]\nprovider = \"off\"\n").unwrap();

    Command::cargo_bin("nearcare")
        .unwrap()
        .args(["--config", path.to_str().unwrap(), "nearest", "--locate"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("permission denied").or(
            predicate::str::contains("Location permission denied"),
        ));
}
