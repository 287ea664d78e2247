//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveAllocationSettings};

use super::types::{AttendanceConfig, EngineConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and validates them before handing them to the engines.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── leave.yaml       # Monthly leave grant
/// ├── attendance.yaml  # Geolocation timeout, UTC offset, undo window
/// └── employees.yaml   # Optional seed roster for the in-memory store
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Sick leave per month: {}", loader.leave_settings().sick_leave);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let leave = Self::load_yaml::<LeaveAllocationSettings>(&path.join("leave.yaml"))?;
        let attendance = Self::load_yaml::<AttendanceConfig>(&path.join("attendance.yaml"))?;
        attendance.validate()?;

        Ok(Self {
            config: EngineConfig::new(leave, attendance),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.attendance().validate()?;
        Ok(Self { config })
    }

    /// Loads the seed roster from `employees.yaml` in the directory.
    ///
    /// The roster is optional; a directory without one yields no employees.
    /// Employee ids must be unique within the file.
    pub fn load_roster<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Employee>> {
        let file = path.as_ref().join("employees.yaml");
        if !file.exists() {
            return Ok(Vec::new());
        }
        let roster: Vec<Employee> = Self::load_yaml(&file)?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = roster.iter().find(|e| !seen.insert(e.id.clone())) {
            return Err(EngineError::validation(
                "id",
                format!(
                    "employee '{}' appears more than once in {}",
                    duplicate.id,
                    file.display()
                ),
            ));
        }
        Ok(roster)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the monthly leave grant.
    pub fn leave_settings(&self) -> &LeaveAllocationSettings {
        self.config.leave()
    }

    /// Returns the attendance settings.
    pub fn attendance(&self) -> &AttendanceConfig {
        self.config.attendance()
    }
}
