use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_path(name: &str) -> String {
    workspace_root()
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rental-dex"))
        .args(args)
        .output()
        .expect("failed to run rental-dex CLI")
}

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn cli_writes_python_compatible_output() {
    let dir = temp_dir();
    let out = dir.path().join("stadium2.json");
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&[
        "--dex",
        &fixture_path("johto.json"),
        "--rental",
        &fixture_path("stadium2_rental.txt"),
        "--output",
        &out_str,
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&out).expect("output should be written");
    let expected = fs::read_to_string(fixture_path("stadium2_expected.json"))
        .expect("expected fixture should be readable");
    assert_eq!(written, expected);
}

#[test]
fn cli_pretty_style_writes_indented_json() {
    let dir = temp_dir();
    let out = dir.path().join("pretty.json");
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&[
        "--dex",
        &fixture_path("johto.json"),
        "--rental",
        &fixture_path("stadium_rental.txt"),
        "--output",
        &out_str,
        "--json-style",
        "pretty",
    ]);
    assert!(output.status.success());

    let written = fs::read_to_string(&out).expect("output should be written");
    assert!(written.starts_with("[\n  {"));
    let json: serde_json::Value = serde_json::from_str(&written).expect("output should parse");
    let entries = json.as_array().expect("output should be an array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["special"], 85);
    assert!(entries[0].get("special_attack").is_none());
}

#[test]
fn cli_dry_run_prints_summary_without_writing() {
    let dir = temp_dir();
    let out = dir.path().join("never.json");
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&[
        "--dex",
        &fixture_path("johto.json"),
        "--rental",
        &fixture_path("stadium2_rental.txt"),
        "--output",
        &out_str,
        "--dry-run",
        "--summary",
        "--records",
    ]);
    assert!(output.status.success());
    assert!(!out.exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RENTAL DEX MERGE"));
    assert!(stdout.contains("Chikorita"));
    assert!(stdout.contains("#001 Bulbasaur"));
}

#[test]
fn cli_report_json_lists_counts() {
    let output = run_cli(&[
        "--dex",
        &fixture_path("johto.json"),
        "--rental",
        &fixture_path("stadium2_rental.txt"),
        "--dry-run",
        "--report-json",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(json["merged"], 4);
    assert_eq!(json["dropped"], 2);
    assert_eq!(json["unmatched_rentals"][0], "Chikorita");
}

#[test]
fn cli_missing_input_exits_with_error() {
    let dir = temp_dir();
    let out = dir.path().join("out.json");
    let out_str = out.to_string_lossy().to_string();
    let missing = dir.path().join("missing.json");
    let missing_str = missing.to_string_lossy().to_string();

    let output = run_cli(&[
        "--dex",
        &missing_str,
        "--rental",
        &fixture_path("stadium2_rental.txt"),
        "--output",
        &out_str,
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("InputNotFound"));
    assert!(stderr.contains("missing.json"));
}

#[test]
fn cli_malformed_block_fails_unless_skipped() {
    let dir = temp_dir();
    let listing = dir.path().join("broken.txt");
    let mut text = fs::read_to_string(fixture_path("stadium2_rental.txt"))
        .expect("listing fixture should be readable");
    text.push_str("#007\nSquirtle\n");
    fs::write(&listing, text).expect("failed to write broken listing");
    let listing_str = listing.to_string_lossy().to_string();
    let out = dir.path().join("out.json");
    let out_str = out.to_string_lossy().to_string();

    let failed = run_cli(&[
        "--dex",
        &fixture_path("johto.json"),
        "--rental",
        &listing_str,
        "--output",
        &out_str,
    ]);
    assert_eq!(failed.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&failed.stderr).contains("MalformedRecord"));
    assert!(!out.exists());

    let skipped = run_cli(&[
        "--dex",
        &fixture_path("johto.json"),
        "--rental",
        &listing_str,
        "--output",
        &out_str,
        "--skip-malformed",
    ]);
    assert!(skipped.status.success());
    assert!(String::from_utf8_lossy(&skipped.stderr).contains("skipping rental block 5"));

    let written = fs::read_to_string(&out).expect("output should be written");
    let expected = fs::read_to_string(fixture_path("stadium2_expected.json"))
        .expect("expected fixture should be readable");
    assert_eq!(written, expected);
}

#[test]
fn cli_unwritable_output_exits_with_io_error() {
    let dir = temp_dir();
    let out = dir.path().join("no_such_dir").join("out.json");
    let out_str = out.to_string_lossy().to_string();

    let output = run_cli(&[
        "--dex",
        &fixture_path("johto.json"),
        "--rental",
        &fixture_path("stadium2_rental.txt"),
        "--output",
        &out_str,
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Io"));
}

#[test]
fn cli_rejects_multi_character_delimiter() {
    let output = run_cli(&["--delimiter", "##", "--dry-run"]);
    assert_eq!(output.status.code(), Some(2));
}
