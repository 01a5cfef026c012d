//! Configuration for clinic-intake.
//!
//! Settings are loaded from multiple sources with layered precedence:
//!
//! 1. Hardcoded defaults (lowest priority)
//! 2. Global config file (`~/.clinic-intake/config.yml`)
//! 3. Project config file (`.clinic-intake/config.yml`), or an explicit `--config` file
//! 4. Environment variables (`CLINIC_INTAKE_*` prefix) (highest priority)
//!
//! The merged result is validated with error accumulation, so every problem is
//! reported at once.

use crate::validation::rules::{DEFAULT_GUARDIAN_RELATIONSHIPS, DEFAULT_MINOR_AGE_THRESHOLD};
use crate::validation::RuleSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::Validation;

pub mod loader;

pub use loader::{global_config_path, project_config_path, ConfigLoader};

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Largest accepted minor-age threshold
pub const MAX_MINOR_AGE_THRESHOLD: u32 = 21;

/// Unified configuration for clinic-intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Patients younger than this need a parent or guardian contact.
    #[serde(default = "default_minor_age_threshold")]
    pub minor_age_threshold: u32,

    /// Contact relationships accepted by the guardian rule.
    #[serde(default = "default_guardian_relationships")]
    pub guardian_relationships: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            minor_age_threshold: default_minor_age_threshold(),
            guardian_relationships: default_guardian_relationships(),
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}

fn default_minor_age_threshold() -> u32 {
    DEFAULT_MINOR_AGE_THRESHOLD
}

fn default_guardian_relationships() -> Vec<String> {
    DEFAULT_GUARDIAN_RELATIONSHIPS
        .iter()
        .map(|r| r.to_string())
        .collect()
}

/// One configuration problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub path: String,
    pub value: Option<String>,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} (got '{}'): {}", self.path, value, self.message),
            None => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

impl std::error::Error for ConfigIssue {}

impl IntakeConfig {
    /// Rule tunables derived from this configuration
    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            minor_age_threshold: self.minor_age_threshold,
            guardian_relationships: self.guardian_relationships.clone(),
        }
    }

    /// Validate every field, accumulating all issues
    pub fn validate(&self) -> Validation<(), Vec<ConfigIssue>> {
        let mut errors = Vec::new();

        if self.log_level.is_empty() {
            errors.push(ConfigIssue {
                path: "log_level".to_string(),
                value: Some(self.log_level.clone()),
                message: "log_level cannot be empty".to_string(),
            });
        } else if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            errors.push(ConfigIssue {
                path: "log_level".to_string(),
                value: Some(self.log_level.clone()),
                message: format!("log_level must be one of: {}", VALID_LOG_LEVELS.join(", ")),
            });
        }

        if self.minor_age_threshold == 0 || self.minor_age_threshold > MAX_MINOR_AGE_THRESHOLD {
            errors.push(ConfigIssue {
                path: "minor_age_threshold".to_string(),
                value: Some(self.minor_age_threshold.to_string()),
                message: format!(
                    "minor_age_threshold must be between 1 and {}",
                    MAX_MINOR_AGE_THRESHOLD
                ),
            });
        }

        if self.guardian_relationships.is_empty() {
            errors.push(ConfigIssue {
                path: "guardian_relationships".to_string(),
                value: None,
                message: "at least one guardian relationship is required".to_string(),
            });
        }

        for (index, relationship) in self.guardian_relationships.iter().enumerate() {
            if relationship.trim().is_empty() {
                errors.push(ConfigIssue {
                    path: format!("guardian_relationships[{}]", index),
                    value: Some(relationship.clone()),
                    message: "relationship cannot be blank".to_string(),
                });
            } else if relationship.trim() != relationship {
                errors.push(ConfigIssue {
                    path: format!("guardian_relationships[{}]", index),
                    value: Some(relationship.clone()),
                    message: "relationship cannot have leading or trailing whitespace"
                        .to_string(),
                });
            }
        }

        if errors.is_empty() {
            Validation::success(())
        } else {
            Validation::failure(errors)
        }
    }
}

#[cfg(test)]
mod tests;
