use super::IntakeConfig;
use crate::error::{ErrorCode, ErrorExt, IntakeError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stillwater::Validation;
use tracing::{debug, trace};

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "CLINIC_INTAKE_";

/// Returns the global config file path.
///
/// This is `~/.clinic-intake/config.yml`.
pub fn global_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".clinic-intake").join("config.yml"))
        .unwrap_or_else(|| PathBuf::from("~/.clinic-intake/config.yml"))
}

/// Returns the project config file path.
///
/// This is `.clinic-intake/config.yml` in the current directory.
pub fn project_config_path() -> PathBuf {
    PathBuf::from(".clinic-intake/config.yml")
}

/// A single configuration layer; unset keys leave lower layers untouched
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    log_level: Option<String>,
    minor_age_threshold: Option<u32>,
    guardian_relationships: Option<Vec<String>>,
}

impl ConfigLayer {
    fn apply(self, config: &mut IntakeConfig) {
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(threshold) = self.minor_age_threshold {
            config.minor_age_threshold = threshold;
        }
        if let Some(relationships) = self.guardian_relationships {
            config.guardian_relationships = relationships
                .into_iter()
                .map(|r| r.trim().to_string())
                .collect();
        }
    }
}

/// Layered configuration loader
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
    project_path: PathBuf,
    explicit_path: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading the standard file locations and the process environment
    pub fn new() -> Self {
        Self {
            global_path: Some(global_config_path()),
            project_path: project_config_path(),
            explicit_path: None,
            env: std::env::vars()
                .filter(|(key, _)| key.starts_with(ENV_PREFIX))
                .collect(),
        }
    }

    /// Use `path` instead of the project config file. It must exist.
    pub fn with_explicit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    pub fn with_project_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = path.into();
        self
    }

    /// Skip the global config file
    pub fn without_global(mut self) -> Self {
        self.global_path = None;
        self
    }

    /// Replace the environment snapshot (for tests)
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Load, merge, and validate configuration
    pub fn load(&self) -> Result<IntakeConfig, IntakeError> {
        let mut config = IntakeConfig::default();

        if let Some(global) = &self.global_path {
            if global.exists() {
                debug!("Loading global config from {}", global.display());
                read_layer(global)?.apply(&mut config);
            }
        }

        match &self.explicit_path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(IntakeError::config_with_code(
                        ErrorCode::CONFIG_NOT_FOUND,
                        format!("Configuration file not found: {}", explicit.display()),
                    ));
                }
                debug!("Loading config from {}", explicit.display());
                read_layer(explicit)?.apply(&mut config);
            }
            None if self.project_path.exists() => {
                debug!("Loading project config from {}", self.project_path.display());
                read_layer(&self.project_path)?.apply(&mut config);
            }
            None => trace!("No project config at {}", self.project_path.display()),
        }

        self.env_layer()?.apply(&mut config);

        match config.validate() {
            Validation::Success(()) => Ok(config),
            Validation::Failure(issues) => Err(IntakeError::config_with_code(
                ErrorCode::CONFIG_VALIDATION_FAILED,
                format!(
                    "{} problem(s):\n{}",
                    issues.len(),
                    issues
                        .iter()
                        .map(|issue| format!("  - {}", issue))
                        .collect::<Vec<_>>()
                        .join("\n")
                ),
            )),
        }
    }

    fn env_var(&self, name: &str) -> Option<&str> {
        self.env
            .get(&format!("{}{}", ENV_PREFIX, name))
            .map(String::as_str)
    }

    fn env_layer(&self) -> Result<ConfigLayer, IntakeError> {
        let minor_age_threshold = match self.env_var("MINOR_AGE_THRESHOLD") {
            Some(raw) => Some(raw.trim().parse::<u32>().to_config_error(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!(
                    "{}MINOR_AGE_THRESHOLD must be a whole number, got '{}'",
                    ENV_PREFIX, raw
                ),
            )?),
            None => None,
        };

        Ok(ConfigLayer {
            log_level: self.env_var("LOG_LEVEL").map(|s| s.trim().to_string()),
            minor_age_threshold,
            guardian_relationships: self.env_var("GUARDIAN_RELATIONSHIPS").map(|raw| {
                raw.split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect()
            }),
        })
    }
}

fn read_layer(path: &Path) -> Result<ConfigLayer, IntakeError> {
    let content = std::fs::read_to_string(path).to_config_error(
        ErrorCode::CONFIG_GENERIC,
        format!("Failed to read {}", path.display()),
    )?;

    if content.trim().is_empty() {
        return Ok(ConfigLayer::default());
    }

    serde_yaml::from_str::<ConfigLayer>(&content).to_config_error(
        ErrorCode::CONFIG_INVALID_YAML,
        format!("Invalid YAML in {}", path.display()),
    )
}
