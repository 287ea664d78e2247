//! Configuration types for the HR engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::time::Duration;

use chrono::FixedOffset;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveAllocationSettings;

fn default_location_timeout_secs() -> u64 {
    15
}

fn default_undo_window_minutes() -> i64 {
    15
}

/// Attendance configuration from attendance.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceConfig {
    /// How long to wait for a location fix before giving up.
    #[serde(default = "default_location_timeout_secs")]
    pub location_timeout_secs: u64,
    /// Offset from UTC, in minutes, used to derive a record's calendar date.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// How long after punching in a punch-in may still be undone.
    #[serde(default = "default_undo_window_minutes")]
    pub undo_window_minutes: i64,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            location_timeout_secs: default_location_timeout_secs(),
            utc_offset_minutes: 0,
            undo_window_minutes: default_undo_window_minutes(),
        }
    }
}

impl AttendanceConfig {
    /// Checks that every value is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.location_timeout_secs == 0 {
            return Err(EngineError::validation(
                "location_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.undo_window_minutes < 0 {
            return Err(EngineError::validation(
                "undo_window_minutes",
                "must not be negative",
            ));
        }
        self.offset()?;
        Ok(())
    }

    /// The location timeout as a [`Duration`].
    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location_timeout_secs)
    }

    /// The configured offset from UTC.
    pub fn offset(&self) -> EngineResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            EngineError::validation(
                "utc_offset_minutes",
                format!("{} is not a valid UTC offset", self.utc_offset_minutes),
            )
        })
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Monthly leave grant.
    leave: LeaveAllocationSettings,
    /// Attendance settings.
    attendance: AttendanceConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(leave: LeaveAllocationSettings, attendance: AttendanceConfig) -> Self {
        Self { leave, attendance }
    }

    /// Returns the monthly leave grant.
    pub fn leave(&self) -> &LeaveAllocationSettings {
        &self.leave
    }

    /// Returns the attendance settings.
    pub fn attendance(&self) -> &AttendanceConfig {
        &self.attendance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_defaults_apply_to_empty_yaml() {
        let config: AttendanceConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AttendanceConfig::default());
        assert_eq!(config.location_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_offset_out_of_range_is_rejected() {
        let config = AttendanceConfig {
            utc_offset_minutes: 24 * 60,
            ..AttendanceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = AttendanceConfig {
            location_timeout_secs: 0,
            ..AttendanceConfig::default()
        };
        match config.validate() {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "location_timeout_secs")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
