//! Integration tests for the bizpulse CLI
//!
//! Each test runs the real binary in a scratch directory so that no
//! project or user configuration leaks in.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create a bizpulse command isolated in `dir`
fn bizpulse(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("bizpulse"));
    cmd.current_dir(dir)
        .env_remove("BIZPULSE_CONFIG")
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("NO_COLOR", "1");
    cmd
}

/// Helper to write a config file with an instant assistant
fn instant_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("instant.toml");
    fs::write(&path, "[conversation]\nresponse_delay_ms = 0\n").unwrap();
    path
}

// =============================================================================
// BASIC COMMANDS
// =============================================================================

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_command_prints_hint() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("stats"));
}

// =============================================================================
// CLASSIFY / RECOMMEND / RESOURCES
// =============================================================================

#[test]
fn test_classify_human() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .args(["classify", "How do I get a loan?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("funding"));
}

#[test]
fn test_classify_json() {
    let temp = TempDir::new().unwrap();
    let output = bizpulse(temp.path())
        .args(["--json", "classify", "The permit office was terrible"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["topic"], "permits");
    assert_eq!(json["sentiment"]["sentiment"], "negative");
}

#[test]
fn test_recommend_limit() {
    let temp = TempDir::new().unwrap();
    let output = bizpulse(temp.path())
        .args(["--json", "recommend", "grant or loan for my bakery", "--limit", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 1);
}

#[test]
fn test_resources_for_topic() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .args(["resources", "funding"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low-Interest Loan Program"));
}

#[test]
fn test_resources_whole_catalog() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("PERMITS"))
        .stdout(predicate::str::contains("SUPPORT"));
}

#[test]
fn test_resources_unknown_topic_fails() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .args(["resources", "zoning"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zoning"));
}

// =============================================================================
// STATS
// =============================================================================

#[test]
fn test_stats_defaults_to_demo_posts() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("8 posts"))
        .stdout(predicate::str::contains("62.5% positive"));
}

#[test]
fn test_stats_json_from_file() {
    let temp = TempDir::new().unwrap();
    let posts = temp.path().join("posts.jsonl");
    fs::write(
        &posts,
        concat!(
            r#"{"id": 1, "text": "Great grant workshop", "observed_at": "2h ago"}"#,
            "\n",
            r#"{"id": 2, "text": "Tax portal is broken", "sentiment": "negative"}"#,
            "\n",
        ),
    )
    .unwrap();

    let output = bizpulse(temp.path())
        .args(["--json", "stats", "--posts", "posts.jsonl", "--granularity", "week"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["statistics"]["total_posts"], 2);
    assert_eq!(json["statistics"]["sentiment_breakdown"]["negative"], 1);
    assert_eq!(json["statistics"]["topic_breakdown"]["funding"], 1);
    assert_eq!(json["trend"]["granularity"], "week");
}

#[test]
fn test_stats_bad_granularity_fails() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .args(["stats", "--granularity", "fortnight"])
        .assert()
        .failure();
}

// =============================================================================
// INIT & CONFIG
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();
    bizpulse(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(temp.path().join("bizpulse.toml")).unwrap();
    assert!(content.contains("[conversation]"));
    assert!(content.contains("response_delay_ms = 1500"));
    assert!(content.contains("[[classifier.rules]]"));
}

#[test]
fn test_init_keeps_existing_without_force() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bizpulse.toml");
    fs::write(&path, "# mine\n").unwrap();

    bizpulse(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    bizpulse(temp.path()).args(["init", "--force"]).assert().success();
    assert!(fs::read_to_string(&path).unwrap().contains("[server]"));
}

#[test]
fn test_project_config_is_picked_up() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bizpulse.toml"),
        "[[classifier.rules]]\ntopic = \"taxes\"\ntriggers = [\"irs\"]\n",
    )
    .unwrap();

    bizpulse(temp.path())
        .args(["--json", "classify", "letter from the IRS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"taxes\""));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();

    bizpulse(temp.path())
        .args(["--config", "broken.toml", "classify", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}

// =============================================================================
// CHAT
// =============================================================================

#[test]
fn test_chat_answers_with_resources() {
    let temp = TempDir::new().unwrap();
    let config = instant_config(temp.path());

    bizpulse(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("chat")
        .write_stdin("How do I get a loan?\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("County resource assistant"))
        .stdout(predicate::str::contains("Great question!"))
        .stdout(predicate::str::contains("Low-Interest Loan Program"));
}

#[test]
fn test_chat_json_transcript() {
    let temp = TempDir::new().unwrap();
    let config = instant_config(temp.path());

    let output = bizpulse(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["--json", "chat"])
        .write_stdin("\nI need a permit\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let turns: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // greeting, user, acknowledgment, recommendations
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[1]["speaker"], "user");
}
