use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const JANE: &str = "Jane Doe\nMarketing Director\nCreative Agency\njane.doe@example.com\n(555) 123-4567\n";
const BOB: &str = "Bob Stone\nbob@stone.io\n";

fn bizcard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bizcard").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{}").unwrap();
    dir
}

#[test]
fn extract_text_card_as_json() {
    let dir = workspace();
    fs::write(dir.path().join("jane.txt"), JANE).unwrap();

    bizcard(dir.path())
        .args(["-c", "config.json", "extract", "jane.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Jane Doe\""))
        .stdout(predicate::str::contains("\"email\": \"jane.doe@example.com\""))
        .stdout(predicate::str::contains("\"source_file\": \"jane.txt\""));
}

#[test]
fn extract_text_card_as_csv() {
    let dir = workspace();
    fs::write(dir.path().join("jane.txt"), JANE).unwrap();

    bizcard(dir.path())
        .args(["-c", "config.json", "extract", "jane.txt", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"Name\",\"Title\",\"Company\",\"Email\",\"Phone\",\"Address\",\"Website\"",
        ))
        .stdout(predicate::str::contains("\"Jane Doe\",\"Marketing Director\",\"Creative Agency\""));
}

#[test]
fn extract_show_raw_prints_recognized_text() {
    let dir = workspace();
    fs::write(dir.path().join("bob.txt"), BOB).unwrap();

    bizcard(dir.path())
        .args(["-c", "config.json", "extract", "bob.txt", "-f", "text", "--show-raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recognized text:"))
        .stdout(predicate::str::contains("bob@stone.io"));
}

#[test]
fn extract_missing_file_fails() {
    let dir = workspace();

    bizcard(dir.path())
        .args(["-c", "config.json", "extract", "nope.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_rejects_unsupported_format() {
    let dir = workspace();
    fs::write(dir.path().join("card.pdf"), "x").unwrap();

    bizcard(dir.path())
        .args(["-c", "config.json", "extract", "card.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn batch_isolates_failing_files() {
    let dir = workspace();
    let cards = dir.path().join("cards");
    fs::create_dir(&cards).unwrap();
    fs::write(cards.join("a_jane.txt"), JANE).unwrap();
    fs::write(cards.join("b_bob.txt"), BOB).unwrap();
    fs::write(cards.join("c_broken.png"), "not an image").unwrap();

    bizcard(dir.path())
        .args([
            "-c",
            "config.json",
            "batch",
            "cards/*",
            "-o",
            "out.csv",
            "--index",
            "--source",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cards processed: 2"))
        .stdout(predicate::str::contains("Emails found:    2"))
        .stdout(predicate::str::contains("Phones found:    1"))
        .stdout(predicate::str::contains("Failures:        1"))
        .stdout(predicate::str::contains("c_broken.png"));

    let csv = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\"#\",\"Name\""));
    assert!(lines[0].ends_with("\"Source File\""));
    assert!(lines[1].starts_with("\"1\",\"Jane Doe\""));
    assert!(lines[2].ends_with("\"b_bob.txt\""));
}

#[test]
fn batch_fail_fast_stops_on_error() {
    let dir = workspace();
    fs::write(dir.path().join("a_broken.png"), "not an image").unwrap();
    fs::write(dir.path().join("b_jane.txt"), JANE).unwrap();

    bizcard(dir.path())
        .args(["-c", "config.json", "batch", "*.*", "-o", "out.csv", "--fail-fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn batch_honors_upload_limit() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"session": {"max_upload_count": 2}}"#,
    )
    .unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        fs::write(dir.path().join(name), BOB).unwrap();
    }

    bizcard(dir.path())
        .args(["-c", "config.json", "batch", "*.txt", "-o", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cards processed: 2"))
        .stdout(predicate::str::contains("Maximum 2 cards allowed"))
        .stdout(predicate::str::contains("c.txt"));
}

#[test]
fn batch_writes_json_per_card() {
    let dir = workspace();
    fs::write(dir.path().join("jane.txt"), JANE).unwrap();

    bizcard(dir.path())
        .args(["-c", "config.json", "batch", "*.txt", "-o", "out.csv", "--json", "json"])
        .assert()
        .success();

    let json = fs::read_to_string(dir.path().join("json").join("jane.txt.json")).unwrap();
    assert!(json.contains("\"title\": \"Marketing Director\""));
}

#[test]
fn batch_json_keeps_cards_with_the_same_file_name() {
    let dir = workspace();
    for (sub, text) in [("a", JANE), ("b", BOB)] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("card.txt"), text).unwrap();
    }

    bizcard(dir.path())
        .args(["-c", "config.json", "batch", "*/card.txt", "-o", "out.csv", "--json", "json"])
        .assert()
        .success();

    let first = fs::read_to_string(dir.path().join("json").join("card.txt.json")).unwrap();
    let second = fs::read_to_string(dir.path().join("json").join("card.txt.2.json")).unwrap();
    assert!(first.contains("\"name\": \"Jane Doe\""));
    assert!(second.contains("\"name\": \"Bob Stone\""));
}

#[test]
fn batch_without_matches_fails() {
    let dir = workspace();

    bizcard(dir.path())
        .args(["-c", "config.json", "batch", "*.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();

    bizcard(dir.path())
        .args(["-c", "settings/bizcard.json", "config", "set", "extraction.name_window", "4"])
        .assert()
        .success();

    bizcard(dir.path())
        .args(["-c", "settings/bizcard.json", "config", "get", "extraction.name_window"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4"));
}

#[test]
fn config_set_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();

    bizcard(dir.path())
        .args(["-c", "bizcard.json", "config", "set", "extraction.typo", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = workspace();

    bizcard(dir.path())
        .args(["-c", "config.json", "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    bizcard(dir.path())
        .args(["-c", "config.json", "config", "init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(content.contains("\"max_upload_count\": 10"));
}
