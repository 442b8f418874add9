//! Tests for config functionality.

use crate::config::types::LoggingConfig;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::SymposiumError;
use crate::topology::{Seat, Topology};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.rounds, 3);
    assert_eq!(config.eat_time_ms, 0);
    assert_eq!(config.think_time_ms, 0);
    assert_eq!(config.topology(), Topology::classic());
    assert_eq!(config.logging, LoggingConfig::default());
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
    config.validate().unwrap();
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
rounds: 7
eat_time_ms: 5
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.rounds, 7);
    assert_eq!(config.eat_time_ms, 5);

    // Unspecified values should use defaults
    assert_eq!(config.think_time_ms, 0);
    assert_eq!(config.philosophers.len(), 5);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
rounds: 2
eat_time_ms: 10
think_time_ms: 20
philosophers:
  - { name: Kant, left: 2, right: 0 }
  - { name: Hume, left: 0, right: 1 }
  - { name: Hobbes, left: 1, right: 2 }
logging:
  level: debug
  json: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.rounds, 2);
    assert_eq!(
        config.philosophers,
        vec![
            Seat::new("Kant", 2, 0),
            Seat::new("Hume", 0, 1),
            Seat::new("Hobbes", 1, 2),
        ]
    );
    assert_eq!(config.topology(), Topology::ring(["Kant", "Hume", "Hobbes"]));
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);

    let settings = config.settings();
    assert_eq!(settings.rounds, 2);
    assert_eq!(settings.eat_time, Duration::from_millis(10));
    assert_eq!(settings.think_time, Duration::from_millis(20));
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    let yaml = r#"
rounds: 4
dessert: baklava
future_feature_x:
  nested: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.rounds, 4);
}

#[test]
fn test_zero_rounds_is_valid() {
    let config = Config::from_yaml("rounds: 0").unwrap();
    assert_eq!(config.settings().rounds, 0);
}

#[test]
fn test_malformed_yaml_is_user_error() {
    let err = Config::from_yaml("rounds: [").unwrap_err();
    assert!(matches!(err, SymposiumError::UserError(_)));
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_validate_empty_table() {
    let config = Config::from_yaml("philosophers: []").unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, SymposiumError::InvalidTopology(_)));
}

#[test]
fn test_validate_duplicate_philosophers() {
    let yaml = r#"
philosophers:
  - { name: Kant, left: 0, right: 1 }
  - { name: Kant, left: 1, right: 0 }
"#;
    let err = Config::from_yaml(yaml).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("duplicate philosopher name 'Kant'"));
}

#[test]
fn test_validate_fork_out_of_range() {
    let yaml = r#"
philosophers:
  - { name: Kant, left: 0, right: 9 }
"#;
    let err = Config::from_yaml(yaml).unwrap().validate().unwrap_err();
    assert!(matches!(err, SymposiumError::InvalidTopology(_)));
    assert!(err.to_string().contains("fork 9"));
}

#[test]
fn test_loading_leaves_seating_plan_to_the_caller() {
    let yaml = r#"
rounds: 2
philosophers:
  - { name: Kant, left: 0, right: 9 }
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.rounds, 2);
    config.validate_settings().unwrap();
    assert!(matches!(
        config.validate(),
        Err(SymposiumError::InvalidTopology(_))
    ));
}

#[test]
fn test_validate_log_level() {
    let err = Config::from_yaml("logging: { level: loud }").unwrap_err();
    assert!(err.to_string().contains("logging.level"));
    assert!(err.to_string().contains("loud"));

    let config = Config::from_yaml("logging: { level: WARN }").unwrap();
    assert_eq!(config.logging.level, "WARN");
}

#[test]
fn test_yaml_round_trip_preserves_defaults() {
    let yaml = Config::default().to_yaml().unwrap();
    assert!(yaml.contains("Plato"));
    assert_eq!(Config::from_yaml(&yaml).unwrap(), Config::default());
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dinner.yaml");
    std::fs::write(&path, "rounds: 9\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.rounds, 9);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_resolve_prefers_explicit_then_default_file() {
    let dir = TempDir::new().unwrap();

    // Nothing on disk: defaults.
    assert_eq!(Config::resolve(None, dir.path()).unwrap(), Config::default());

    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "rounds: 11\n").unwrap();
    assert_eq!(Config::resolve(None, dir.path()).unwrap().rounds, 11);

    let explicit = dir.path().join("other.yaml");
    std::fs::write(&explicit, "rounds: 12\n").unwrap();
    assert_eq!(
        Config::resolve(Some(&explicit), dir.path()).unwrap().rounds,
        12
    );
}
