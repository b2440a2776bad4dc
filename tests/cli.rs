//! End-to-end tests for the `textspin` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn textspin() -> Command {
    Command::cargo_bin("textspin").expect("binary to build")
}

fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn spin_prints_one_of_the_expansions() {
    textspin()
        .args(["spin", "{this|that{| one}} ~verb~", "-p", "verb=jumps"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match("^(this jumps|that jumps|that one jumps)\n$").unwrap(),
        );
}

#[test]
fn spin_count_and_json_format() {
    let output = textspin()
        .args(["spin", "{a|b}", "-n", "4", "--format", "json"])
        .output()
        .expect("run textspin");
    assert!(output.status.success());
    let samples: Vec<String> = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(samples.len(), 4);
    assert!(samples.iter().all(|s| s == "a" || s == "b"));
}

#[test]
fn spin_with_seed_is_reproducible() {
    let run = || {
        textspin()
            .args(["spin", "{a|b|c}{d|e|f}", "-n", "5", "--seed", "11"])
            .output()
            .expect("run textspin")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn spin_raw_keeps_references() {
    textspin()
        .args(["spin", "{hi} ~name~", "--raw", "-p", "name=Andy"])
        .assert()
        .success()
        .stdout("hi ~name~\n");
}

#[test]
fn spin_malformed_template_fails() {
    textspin()
        .args(["spin", "{never closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unmatched open marker"));
}

#[test]
fn spin_from_document_with_custom_markers() {
    let document = temp_file(
        ".json",
        r##"{"template": "[hi#hi] $name$", "placeholders": {"name": "Joe"},
            "markers": {"open": "[", "close": "]", "separator": "#", "placeholder": "$"}}"##,
    );
    textspin()
        .args(["spin", "--document"])
        .arg(document.path())
        .assert()
        .success()
        .stdout("hi Joe\n");
}

#[test]
fn spin_rejects_badly_shaped_document() {
    let document = temp_file(".json", r#"{"template": 42}"#);
    textspin()
        .args(["spin", "--document"])
        .arg(document.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid template"));
}

#[test]
fn spin_reads_yaml_placeholders() {
    let placeholders = temp_file(".yaml", "name: Andy\nage: \"19\"\n");
    textspin()
        .args(["spin", "~name~ is ~age~", "--placeholders"])
        .arg(placeholders.path())
        .assert()
        .success()
        .stdout("Andy is 19\n");
}

#[test]
fn config_file_changes_markers() {
    let config = temp_file(
        ".toml",
        "[markers]\nopen = \"<\"\nclose = \">\"\nseparator = \"/\"\nplaceholder = \"%\"\n",
    );
    textspin()
        .args(["spin", "<x> %n%", "-p", "n=1", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout("x 1\n");
}

#[test]
fn validate_reports_valid_and_invalid() {
    textspin()
        .args(["validate", "Hello, {Joe|Jane}!"])
        .assert()
        .success()
        .stdout("valid\n");

    textspin()
        .args(["validate", "{Hello, {Joe|Jane}!"])
        .assert()
        .failure()
        .stdout("invalid\n");
}

#[test]
fn validate_strict_catches_misordered_markers() {
    textspin()
        .args(["validate", "a} {b"])
        .assert()
        .success();

    textspin()
        .args(["validate", "a} {b", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unmatched close marker"));
}

#[test]
fn validate_checks_placeholders_on_request() {
    textspin()
        .args(["validate", "~name~ ~age~", "-p", "name=Andy", "--placeholders-check"])
        .assert()
        .failure();
}

#[test]
fn audit_lists_invalid_names() {
    textspin()
        .args([
            "audit",
            "Hello, {Joe|Jane|~name~}! You are ~age~ years {old|of age}.",
            "-p",
            "name=Andy",
        ])
        .assert()
        .failure()
        .stdout("age\n");

    textspin()
        .args(["audit", "~name~", "-p", "name=Andy"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn placeholder_argument_requires_assignment() {
    textspin()
        .args(["spin", "x", "-p", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected name=value"));
}

#[test]
fn set_overrides_configuration_keys() {
    textspin()
        .args(["spin", "<x> ~n~", "-p", "n=1", "--set", "markers.open=<", "--set", "markers.close=>"])
        .assert()
        .success()
        .stdout("x 1\n");

    textspin()
        .args(["spin", "{a}", "--set", "spin.count=3"])
        .assert()
        .success()
        .stdout("a\na\na\n");
}

#[test]
fn set_wins_over_config_file() {
    let config = temp_file(".toml", "[spin]\ncount = 4\n");
    textspin()
        .args(["spin", "{a}", "--set", "spin.count=2", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout("a\na\n");
}

#[test]
fn unreadable_placeholder_file_fails() {
    let placeholders = temp_file(".json", "[1, 2]");
    textspin()
        .args(["spin", "~name~", "--placeholders"])
        .arg(placeholders.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid placeholders"));

    textspin()
        .args(["spin", "~name~", "--placeholders", "/nonexistent/values.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading /nonexistent/values.json"));
}
