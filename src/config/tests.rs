use super::*;
use crate::error::{ErrorCode, IntakeError};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn isolated_loader(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::new()
        .without_global()
        .with_project_file(dir.path().join("missing.yml"))
        .with_env(HashMap::new())
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_intake_config_default() {
    let config = IntakeConfig::default();

    assert_eq!(config.log_level, "info");
    assert_eq!(config.minor_age_threshold, 14);
    assert_eq!(config.guardian_relationships, vec!["parent", "guardian"]);
    assert!(matches!(config.validate(), Validation::Success(_)));
}

#[test]
fn test_rule_settings_mirror_config() {
    let config = IntakeConfig {
        minor_age_threshold: 16,
        guardian_relationships: vec!["tutor".to_string()],
        ..Default::default()
    };
    let settings = config.rule_settings();
    assert_eq!(settings.minor_age_threshold, 16);
    assert_eq!(settings.guardian_relationships, vec!["tutor"]);
}

#[test]
fn test_yaml_deserialization_fills_defaults() {
    let yaml = r#"
minor_age_threshold: 16
"#;
    let config: IntakeConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(config.minor_age_threshold, 16);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.guardian_relationships.len(), 2);
}

#[test]
fn test_validation_accumulates_all_issues() {
    let config = IntakeConfig {
        log_level: "loud".to_string(),
        minor_age_threshold: 0,
        guardian_relationships: vec!["parent".to_string(), "  ".to_string()],
    };

    match config.validate() {
        Validation::Failure(issues) => {
            let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
            assert_eq!(
                paths,
                vec![
                    "log_level",
                    "minor_age_threshold",
                    "guardian_relationships[1]"
                ]
            );
        }
        Validation::Success(_) => panic!("Expected validation to fail"),
    }
}

#[test]
fn test_empty_relationships_rejected() {
    let config = IntakeConfig {
        guardian_relationships: vec![],
        ..Default::default()
    };
    match config.validate() {
        Validation::Failure(issues) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].path, "guardian_relationships");
        }
        Validation::Success(_) => panic!("Expected validation to fail"),
    }
}

#[test]
fn test_issue_display() {
    let issue = ConfigIssue {
        path: "log_level".to_string(),
        value: Some("loud".to_string()),
        message: "bad level".to_string(),
    };
    assert_eq!(issue.to_string(), "log_level (got 'loud'): bad level");
}

#[test]
fn test_loader_defaults_without_sources() {
    let dir = TempDir::new().unwrap();
    let config = isolated_loader(&dir).load().unwrap();
    assert_eq!(config, IntakeConfig::default());
}

#[test]
fn test_loader_project_file_then_env() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("config.yml");
    fs::write(&project, "log_level: debug\nminor_age_threshold: 16\n").unwrap();

    let config = isolated_loader(&dir)
        .with_project_file(&project)
        .with_env(env(&[("CLINIC_INTAKE_MINOR_AGE_THRESHOLD", "12")]))
        .load()
        .unwrap();

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.minor_age_threshold, 12);
}

#[test]
fn test_loader_env_relationships_are_split() {
    let dir = TempDir::new().unwrap();
    let config = isolated_loader(&dir)
        .with_env(env(&[(
            "CLINIC_INTAKE_GUARDIAN_RELATIONSHIPS",
            "parent, legal guardian,,tutor",
        )]))
        .load()
        .unwrap();

    assert_eq!(
        config.guardian_relationships,
        vec!["parent", "legal guardian", "tutor"]
    );
}

#[test]
fn test_loader_trims_file_relationships() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, "guardian_relationships: [\" parent\", \"tutor \"]\n").unwrap();

    let config = isolated_loader(&dir)
        .with_explicit_file(&path)
        .load()
        .unwrap();

    assert_eq!(config.guardian_relationships, vec!["parent", "tutor"]);
    assert!(config.rule_settings().guardian_relationships.contains(&"parent".to_string()));
}

#[test]
fn test_padded_relationship_rejected() {
    let config = IntakeConfig {
        guardian_relationships: vec![" parent".to_string()],
        ..Default::default()
    };
    match config.validate() {
        Validation::Failure(issues) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].path, "guardian_relationships[0]");
        }
        Validation::Success(_) => panic!("Expected validation to fail"),
    }
}

#[test]
fn test_loader_explicit_file_must_exist() {
    let dir = TempDir::new().unwrap();
    let err = isolated_loader(&dir)
        .with_explicit_file(dir.path().join("nope.yml"))
        .load()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
}

#[test]
fn test_loader_rejects_bad_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yml");
    fs::write(&path, "minor_age_threshold: [not, a, number]\n").unwrap();

    let err = isolated_loader(&dir)
        .with_explicit_file(&path)
        .load()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_YAML);
}

#[test]
fn test_loader_rejects_non_numeric_env_threshold() {
    let dir = TempDir::new().unwrap();
    let err = isolated_loader(&dir)
        .with_env(env(&[("CLINIC_INTAKE_MINOR_AGE_THRESHOLD", "fourteen")]))
        .load()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
}

#[test]
fn test_loader_reports_every_validation_problem() {
    let dir = TempDir::new().unwrap();
    let err = isolated_loader(&dir)
        .with_env(env(&[
            ("CLINIC_INTAKE_LOG_LEVEL", "shouty"),
            ("CLINIC_INTAKE_MINOR_AGE_THRESHOLD", "40"),
        ]))
        .load()
        .unwrap_err();

    assert!(matches!(err, IntakeError::Config { .. }));
    assert_eq!(err.code(), ErrorCode::CONFIG_VALIDATION_FAILED);
    let message = err.to_string();
    assert!(message.contains("2 problem(s)"));
    assert!(message.contains("log_level"));
    assert!(message.contains("minor_age_threshold"));
}

#[test]
fn test_empty_config_file_is_allowed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.yml");
    fs::write(&path, "\n").unwrap();

    let config = isolated_loader(&dir)
        .with_explicit_file(&path)
        .load()
        .unwrap();
    assert_eq!(config, IntakeConfig::default());
}
