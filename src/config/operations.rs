//! Config loading, validation, and conversion into a dinner.

use super::model::Config;
use super::types::LOG_LEVELS;
use crate::error::{Result, SymposiumError};
use crate::table::DinnerSettings;
use crate::topology::Topology;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "symposium.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded config with valid settings
    /// * `Err(SymposiumError::UserError)` - Read or parse failure, bad values
    ///
    /// The seating plan is not checked here; callers that seat `philosophers`
    /// validate it through [`Config::validate`] or `Table::new`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SymposiumError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load the explicit config file if given, else `symposium.yaml` in `dir`
    /// if it exists, else the defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::load(fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means all defaults.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                SymposiumError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate_settings()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SymposiumError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate the whole config, seating plan included.
    ///
    /// Validation rules:
    /// - settings pass [`Config::validate_settings`]
    /// - `philosophers` forms a valid seating plan (see [`Topology::validate`])
    pub fn validate(&self) -> Result<()> {
        self.validate_settings()?;
        self.topology().validate()
    }

    /// Validate everything except `philosophers`.
    ///
    /// Validation rules:
    /// - `logging.level` is one of trace, debug, info, warn, error, off
    pub fn validate_settings(&self) -> Result<()> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SymposiumError::UserError(format!(
                "config validation failed: logging.level must be one of {} (found '{}')",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }
        Ok(())
    }

    /// The seating plan described by `philosophers`.
    pub fn topology(&self) -> Topology {
        Topology::new(self.philosophers.clone())
    }

    /// Rounds and pacing for a dinner.
    pub fn settings(&self) -> DinnerSettings {
        DinnerSettings {
            rounds: self.rounds,
            eat_time: Duration::from_millis(self.eat_time_ms),
            think_time: Duration::from_millis(self.think_time_ms),
        }
    }
}
