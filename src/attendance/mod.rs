//! Attendance tracking.
//!
//! This module contains the geofenced punch-in/punch-out state machine,
//! location acquisition with a timeout, haversine distance checks, elapsed
//! time formatting, and the aggregation used by attendance reports.

mod duration;
mod engine;
mod geofence;
mod location;
mod report;

pub use duration::{elapsed_since, format_hms};
pub use engine::{AttendanceEngine, AttendanceStatus, PunchState, current_state};
pub use geofence::{EARTH_RADIUS_METERS, check_geofence, haversine_distance, validate_coordinates};
pub use location::{LocationProvider, ReportedLocation, acquire_position};
pub use report::{
    AttendanceRow, AttendanceSummary, IN_PROGRESS_LABEL, attendance_rows, summarize_attendance,
};
