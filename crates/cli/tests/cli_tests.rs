//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("hamus")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn fixture_args() -> Vec<String> {
    vec![get_fixture_path("instances.jsonl"), "--truth".to_string(), get_fixture_path("truth.jsonl"), "--no-ocr".to_string()]
}

#[test]
fn test_cli_csv_default() {
    cmd()
        .args(fixture_args())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,numChars_post_title,"))
        .stdout(predicate::str::contains(",label\n"));
}

#[test]
fn test_cli_csv_rows() {
    let output = cmd().args(fixture_args()).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("1,16,"));
    assert!(lines[1].ends_with(",0"));
    assert!(lines[4].ends_with(",1"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd().args(fixture_args()).args(["-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 4);
    assert_eq!(json["classes"], serde_json::json!(["clickbait", "no-clickbait"]));
    assert_eq!(json["ids"][3], "4");
}

#[test]
fn test_cli_families_filter() {
    let output = cmd().args(fixture_args()).args(["--families", "sentiment", "-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let columns = json["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 6);
    assert!(columns.iter().all(|c| c.as_str().unwrap().starts_with("sentiment_")));
}

#[test]
fn test_cli_invalid_family() {
    cmd()
        .args(fixture_args())
        .args(["--families", "colors"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid feature family"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(fixture_args())
        .args(["-f", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_without_truth() {
    cmd()
        .args([get_fixture_path("instances.jsonl"), "--no-ocr".to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("label").not())
        .stderr(predicate::str::contains("No ground truth found"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("features.csv");

    cmd()
        .args(fixture_args())
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Output written to"));

    assert!(output.exists());
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn test_cli_missing_columns() {
    cmd()
        .args([get_fixture_path("invalid/instances.jsonl"), "--no-ocr".to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing 'postMedia'"));
}

#[test]
fn test_cli_too_many_classes() {
    cmd()
        .args([get_fixture_path("instances.jsonl"), "--no-ocr".to_string()])
        .args(["--truth", &get_fixture_path("truth_three_classes.jsonl")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 classes"));
}

#[test]
fn test_cli_nonexistent_file() {
    cmd()
        .arg("/nonexistent/instances.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read dataset"));
}

#[test]
fn test_cli_resources() {
    cmd()
        .args(fixture_args())
        .args(["--dictionary", &get_fixture_path("wordnet"), "--lexicon", &get_fixture_path("lexicon.txt")])
        .args(["--stopwords", &get_fixture_path("stopwords.txt"), "--threads", "2"])
        .assert()
        .success();
}

#[test]
fn test_cli_missing_dictionary() {
    cmd()
        .args(fixture_args())
        .args(["--dictionary", "/nonexistent/wordnet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load linguistic resources"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(fixture_args())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Extracting features"))
        .stderr(predicate::str::contains("Feature Table"));
}

#[test]
fn test_cli_stopword_and_digit_switches() {
    cmd().args(fixture_args()).args(["--remove-stopwords", "--drop-digits"]).assert().success();
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clickbait"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
