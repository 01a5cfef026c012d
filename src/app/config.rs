//! Application configuration
//!
//! Runtime settings for the binary that sit beside the validation config.

use crate::config::IntakeConfig;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level from repeated `-v` flags
    pub verbose: u8,
    /// Log level from configuration, used when no `-v` is given
    pub configured_level: String,
}

impl AppConfig {
    pub fn new(verbose: u8, intake: &IntakeConfig) -> Self {
        Self {
            verbose,
            configured_level: intake.log_level.clone(),
        }
    }

    /// Get the log filter string based on verbosity
    pub fn log_level(&self) -> &str {
        match self.verbose {
            0 => &self.configured_level,
            1 => "debug",
            _ => "trace",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            configured_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_configured_level() {
        let intake = IntakeConfig {
            log_level: "warn".to_string(),
            ..Default::default()
        };

        assert_eq!(AppConfig::new(0, &intake).log_level(), "warn");
        assert_eq!(AppConfig::new(1, &intake).log_level(), "debug");
        assert_eq!(AppConfig::new(2, &intake).log_level(), "trace");
        assert_eq!(AppConfig::new(5, &intake).log_level(), "trace");
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(AppConfig::default().log_level(), "info");
    }
}
