//! Application configuration

use crate::{Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: String,
    pub log_level: String,
    pub youtrack: YouTrackConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct YouTrackConfig {
    /// Host name of the YouTrack instance, without scheme.
    pub domain: String,
    pub query: String,
    pub max_issues: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub csv: bool,
    pub outdated_after_days: i64,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        self.youtrack.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            log_level: "info".to_string(),
            youtrack: YouTrackConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl YouTrackConfig {
    /// Validate connection settings
    pub fn validate(&self) -> Result<()> {
        let domain = self.domain.trim();
        if domain.is_empty() {
            return Err(Error::Validation("YouTrack domain cannot be empty".to_string()));
        }

        if domain.contains("://") {
            return Err(Error::Validation(
                "YouTrack domain must not include a scheme".to_string(),
            ));
        }

        if self.max_issues == 0 {
            return Err(Error::Validation(
                "Max issues must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for YouTrackConfig {
    fn default() -> Self {
        Self {
            domain: "youtrack.example.com".to_string(),
            query: String::new(),
            max_issues: 100,
        }
    }
}

impl ExportConfig {
    /// Validate export settings
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Validation("Output directory cannot be empty".to_string()));
        }

        if self.outdated_after_days <= 0 {
            return Err(Error::Validation(
                "Outdated threshold must be greater than 0 days".to_string(),
            ));
        }

        if Duration::try_days(self.outdated_after_days).is_none() {
            return Err(Error::Validation(format!(
                "Outdated threshold of {} days is out of range",
                self.outdated_after_days
            )));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            csv: false,
            outdated_after_days: 180, // 6 x 30 days
        }
    }
}
