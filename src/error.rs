//! Error types for the HR engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building hierarchies,
//! allocating leave, recording attendance and calculating payroll.

use thiserror::Error;

/// The main error type for the HR engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. None of the
/// variants are fatal; each is recoverable at the call boundary.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was malformed or missing a required value.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The caller is outside the employee's configured geofence.
    ///
    /// The message rounds the distance up and the radius down, so a rejected
    /// distance always reads as larger than the allowed radius.
    #[error(
        "You are {}m from your work location; punch-in is only allowed within {}m",
        .distance_meters.ceil(),
        .radius_meters.floor()
    )]
    OutOfRange {
        /// The computed great-circle distance to the work location.
        distance_meters: f64,
        /// The configured geofence radius.
        radius_meters: f64,
    },

    /// The user refused to share their location.
    #[error("Location permission denied; allow location access to punch in")]
    LocationPermission,

    /// The device could not determine a position.
    #[error("Location unavailable: {message}")]
    LocationUnavailable {
        /// A description of why the position could not be determined.
        message: String,
    },

    /// Location acquisition did not finish in time.
    #[error("Timed out after {timeout_secs}s waiting for a location fix")]
    LocationTimeout {
        /// The configured timeout in seconds.
        timeout_secs: u64,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was not found.
        id: String,
    },

    /// No attendance record exists with the given id.
    #[error("Attendance record not found: {id}")]
    RecordNotFound {
        /// The id that was not found.
        id: String,
    },

    /// The backing store failed to read or save.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the storage failure.
        message: String,
    },

    /// Punch-in requested while the employee already has an open record.
    #[error("Employee '{employee_id}' is already punched in")]
    AlreadyPunchedIn {
        /// The employee that is already punched in.
        employee_id: String,
    },

    /// Punch-out or undo requested while the employee has no open record.
    #[error("Employee '{employee_id}' is not currently punched in")]
    NotPunchedIn {
        /// The employee that is not punched in.
        employee_id: String,
    },

    /// Undo requested after the correction window closed.
    #[error("Punch-in for '{employee_id}' can only be undone within {minutes} minutes")]
    UndoWindowExpired {
        /// The employee whose punch-in is too old.
        employee_id: String,
        /// The configured undo window in minutes.
        minutes: i64,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`EngineError::Persistence`] error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
