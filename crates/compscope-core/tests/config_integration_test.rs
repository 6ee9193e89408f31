//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use compscope_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use compscope_core::models::DistanceUnit;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const ENV_KEYS: [&str; 5] = [
    "COMPSCOPE_LISTING_COUNT",
    "COMPSCOPE_FILTER_DEBOUNCE_MS",
    "COMPSCOPE_INPUT_DEBOUNCE_MS",
    "COMPSCOPE_DISTANCE_UNIT",
    "COMPSCOPE_SEED",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_partial_file_configuration() {
    let file = config_file(
        r#"
listing_count = 75
# Only override the count, leave others as defaults
"#,
    );

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.listing_count.value, 75);
    assert_eq!(config.listing_count.source, ConfigSource::File);
    assert_eq!(config.distance_unit.value, DistanceUnit::Miles);
    assert_eq!(config.distance_unit.source, ConfigSource::Default);
    assert_eq!(config.seed.source, ConfigSource::Default);
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = config_file("listing_count = \"many\"");
    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/compscope.toml");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("COMPSCOPE_LISTING_COUNT", "90");
    env::set_var("COMPSCOPE_DISTANCE_UNIT", "km");
    env::set_var("COMPSCOPE_SEED", "1234");

    let file = config_file(
        r#"
listing_count = 60
distance_unit = "Feet"
seed = 1
"#,
    );

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.listing_count.value, 90);
    assert_eq!(config.listing_count.source, ConfigSource::Environment);
    assert_eq!(config.distance_unit.value, DistanceUnit::Kilometers);
    assert_eq!(config.seed.value, Some(1234));
    assert_eq!(config.seed.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("COMPSCOPE_LISTING_COUNT", "0");
    env::set_var("COMPSCOPE_FILTER_DEBOUNCE_MS", "soon");
    env::set_var("COMPSCOPE_DISTANCE_UNIT", "parsecs");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.listing_count.value, 150);
    assert_eq!(config.listing_count.source, ConfigSource::Default);
    assert_eq!(config.filter_debounce_ms.value, 150);
    assert_eq!(config.distance_unit.value, DistanceUnit::Miles);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    env::set_var("COMPSCOPE_INPUT_DEBOUNCE_MS", "400");

    let file = config_file("input_debounce_ms = 100");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    assert_eq!(config.input_debounce_ms.value, 400);

    config.update_from_cli(CliConfigOverrides {
        input_debounce_ms: Some(50),
        ..Default::default()
    });

    assert_eq!(config.input_debounce_ms.value, 50);
    assert_eq!(config.input_debounce_ms.source, ConfigSource::Cli);

    clear_env();
}
