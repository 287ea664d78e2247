//! Request types for the HR engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! attendance endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attendance::ReportedLocation;
use crate::error::{EngineError, EngineResult};
use crate::models::{Coordinates, DateRange};

/// A location failure reported by the client instead of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationErrorKind {
    /// The user refused location access.
    PermissionDenied,
    /// The device could not determine a position.
    Unavailable,
}

/// Request body for `POST /attendance/{employee_id}/punch-in`.
///
/// Carries either the client's position or the reason it has none. An empty
/// body is accepted; it only succeeds for employees without a geofence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PunchInRequest {
    /// The client's current position.
    #[serde(default)]
    pub location: Option<Coordinates>,
    /// Why the client could not supply a position.
    #[serde(default)]
    pub location_error: Option<LocationErrorKind>,
}

impl PunchInRequest {
    /// Converts the body into the location the engine will consult.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] if both a position and an error are sent.
    pub fn reported_location(&self) -> EngineResult<ReportedLocation> {
        match (self.location, self.location_error) {
            (Some(_), Some(_)) => Err(EngineError::validation(
                "location",
                "send either a location or a location_error, not both",
            )),
            (Some(position), None) => Ok(ReportedLocation::Position(position)),
            (None, Some(LocationErrorKind::PermissionDenied)) => {
                Ok(ReportedLocation::PermissionDenied)
            }
            (None, Some(LocationErrorKind::Unavailable)) => Ok(ReportedLocation::Unavailable),
            (None, None) => Ok(ReportedLocation::NotReported),
        }
    }
}

/// Query string for `GET /attendance/summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// First date of the window (inclusive).
    pub start: NaiveDate,
    /// Last date of the window (inclusive).
    pub end: NaiveDate,
}

impl SummaryQuery {
    /// Validates the window.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_position() {
        let json = r#"{"location": {"latitude": 12.97, "longitude": 77.59}}"#;
        let request: PunchInRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.reported_location().unwrap(),
            ReportedLocation::Position(Coordinates {
                latitude: 12.97,
                longitude: 77.59,
            })
        );
    }

    #[test]
    fn test_deserialize_location_error() {
        let json = r#"{"location_error": "permission_denied"}"#;
        let request: PunchInRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.reported_location().unwrap(),
            ReportedLocation::PermissionDenied
        );
    }

    #[test]
    fn test_empty_body_is_not_reported() {
        let request: PunchInRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            request.reported_location().unwrap(),
            ReportedLocation::NotReported
        );
    }

    #[test]
    fn test_both_location_and_error_is_rejected() {
        let json = r#"{"location": {"latitude": 1.0, "longitude": 2.0}, "location_error": "unavailable"}"#;
        let request: PunchInRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request.reported_location(),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_summary_query_rejects_inverted_range() {
        let query = SummaryQuery {
            start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert!(query.range().is_err());
    }
}
