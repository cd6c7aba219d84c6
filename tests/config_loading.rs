mod common;
use crate::common::init_tracing;

use std::io::Write;

use tasklineage::config::{ConfigFile, load_and_validate, load_or_default};
use tasklineage::errors::LineageError;
use tasklineage::types::{CyclePolicy, DuplicatePolicy};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_is_parsed() {
    init_tracing();

    let file = config_file(
        r##"
[analysis]
on_cycle = "tolerate"
on_duplicate = "reject"

[discovery]
include = ["**/*.task.yml"]
exclude = []

[colors]
default = "#FFFFFF"
raw = "#E6A23C"
"##,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.analysis.on_cycle, CyclePolicy::Tolerate);
    assert_eq!(cfg.analysis.on_duplicate, DuplicatePolicy::Reject);
    assert_eq!(cfg.discovery.include, vec!["**/*.task.yml".to_string()]);
    assert!(cfg.discovery.exclude.is_empty());
    assert_eq!(cfg.colors.len(), 2);
}

#[test]
fn empty_config_uses_defaults() {
    init_tracing();

    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.analysis.on_cycle, CyclePolicy::Reject);
    assert_eq!(cfg.analysis.on_duplicate, DuplicatePolicy::Overwrite);
    assert_eq!(cfg.discovery.include.len(), 2);
    assert_eq!(cfg.discovery.exclude.len(), 3);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let cfg = load_or_default(dir.path().join("Lineage.toml")).unwrap();

    assert_eq!(cfg.color_for_level("anything"), "#FFFFFF");
    assert_eq!(cfg.analysis.on_cycle, CyclePolicy::Reject);
}

#[test]
fn invalid_colour_is_a_config_error() {
    init_tracing();

    let file = config_file("[colors]\nraw = \"orange\"\n");

    match load_and_validate(file.path()) {
        Err(LineageError::ConfigError(msg)) => {
            assert!(msg.contains("raw"));
            assert!(msg.contains("orange"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn invalid_glob_is_a_config_error() {
    init_tracing();

    let file = config_file("[discovery]\ninclude = [\"**/[.yml\"]\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(LineageError::ConfigError(_))
    ));
}

#[test]
fn empty_include_list_is_rejected() {
    init_tracing();

    let file = config_file("[discovery]\ninclude = []\n");

    match load_and_validate(file.path()) {
        Err(LineageError::ConfigError(msg)) => assert!(msg.contains("include")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_policy_is_a_toml_error() {
    init_tracing();

    let file = config_file("[analysis]\non_cycle = \"explode\"\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(LineageError::TomlError(_))
    ));
}

#[test]
fn colour_lookup_prefers_longest_prefix() {
    init_tracing();

    let file = config_file(
        r##"
[colors]
default = "#111111"
raw = "#222222"
raw_orders = "#333333"
"##,
    );
    let cfg: ConfigFile = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.color_for_level("raw_orders_eu"), "#333333");
    assert_eq!(cfg.color_for_level("raw_events"), "#222222");
    assert_eq!(cfg.color_for_level("mart"), "#111111");
}

#[test]
fn policies_parse_from_strings() {
    assert_eq!("Tolerate".parse::<CyclePolicy>(), Ok(CyclePolicy::Tolerate));
    assert_eq!(" reject ".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Reject));
    assert!("maybe".parse::<CyclePolicy>().is_err());
}
