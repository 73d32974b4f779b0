//! Configuration loading and lookup tests

use std::fs;
use std::path::Path;
use std::time::Duration;

use bizpulse::config::{Config, ConfigError};
use bizpulse::core::models::TopicLabel;
use bizpulse::core::services::{Granularity, ResponsePolicy};
use bizpulse::paths::{CONFIG_ENV, resolve_config};
use serial_test::serial;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn with_env<T>(value: Option<&Path>, f: impl FnOnce() -> T) -> T {
    // SAFETY: callers are #[serial], no other thread reads the environment
    unsafe {
        match value {
            Some(path) => std::env::set_var(CONFIG_ENV, path),
            None => std::env::remove_var(CONFIG_ENV),
        }
    }
    let result = f();
    unsafe { std::env::remove_var(CONFIG_ENV) };
    result
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_full_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "bizpulse.toml",
        r##"
[conversation]
response_delay_ms = 250
greeting = ""

[aggregator]
granularity = "week"

[server]
port = 9000

[classifier]
fallback = "training"

[[classifier.rules]]
topic = "taxes"
triggers = ["IRS", "1099"]

[catalog]
support = [{ name = "Front Desk", description = "Walk in", link = "#" }]
"##,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.aggregator.granularity, Granularity::Week);
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");

    let settings = config.conversation_settings();
    assert_eq!(settings.policy, ResponsePolicy::with_delay(Duration::from_millis(250)));
    assert_eq!(settings.greeting, None);

    let classifier = config.classifier();
    assert_eq!(classifier.classify("my 1099 form"), TopicLabel::Taxes);
    assert_eq!(classifier.classify("a permit"), TopicLabel::Training);

    let catalog = config.catalog().unwrap();
    assert_eq!(catalog.lookup(TopicLabel::Support)[0].name, "Front Desk");
    assert_eq!(catalog.lookup(TopicLabel::Support).len(), 1);
    assert!(!catalog.lookup(TopicLabel::Funding).is_empty());
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "[conversation\nresponse_delay_ms = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn test_unknown_catalog_topic() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "bizpulse.toml",
        "[catalog]\nzoning = [{ name = \"x\", description = \"y\", link = \"z\" }]\n",
    );
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTopic(_)));
}

#[test]
fn test_empty_catalog_topic() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bizpulse.toml", "[catalog]\ntaxes = []\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Catalog(_)));
}

#[test]
fn test_template_reloads_identically() {
    let dir = TempDir::new().unwrap();
    let template = Config::template();
    let path = write(&dir, "bizpulse.toml", &template.to_toml().unwrap());
    assert_eq!(Config::load_from(&path).unwrap(), template);
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
#[serial]
fn test_env_var_names_config() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "custom.toml", "[server]\nport = 7000\n");

    let config = with_env(Some(&path), || Config::load(None)).unwrap();
    assert_eq!(config.server.port, 7000);
}

#[test]
#[serial]
fn test_explicit_path_beats_env_var() {
    let dir = TempDir::new().unwrap();
    let from_env = write(&dir, "env.toml", "[server]\nport = 7000\n");
    let explicit = write(&dir, "flag.toml", "[server]\nport = 7001\n");

    let resolved = with_env(Some(&from_env), || resolve_config(Some(&explicit)));
    assert_eq!(resolved, Some(explicit));
}

#[test]
#[serial]
fn test_env_var_pointing_nowhere_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let result = with_env(Some(&missing), || Config::load(None));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
#[serial]
fn test_project_file_found_in_working_directory() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bizpulse.toml", "[aggregator]\ngranularity = \"hour\"\n");

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = with_env(None, || Config::load(None));
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(config.unwrap().aggregator.granularity, Granularity::Hour);
}
