//! Attendance record model.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One punch-in/punch-out pair for an employee.
///
/// A record with no `punch_out_time` is "open": the employee is currently
/// punched in. An employee has at most one open record at any time.
///
/// # Example
///
/// ```
/// use hr_engine::models::AttendanceRecord;
/// use chrono::{DateTime, Duration, Utc};
///
/// let punch_in: DateTime<Utc> = "2026-01-15T09:00:00Z".parse().unwrap();
/// let mut record = AttendanceRecord {
///     id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     punch_in_time: punch_in,
///     punch_out_time: None,
///     date: punch_in.date_naive(),
/// };
/// assert!(record.is_open());
///
/// record.punch_out_time = Some(punch_in + Duration::hours(8));
/// assert_eq!(record.worked_duration(), Some(Duration::hours(8)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee who punched in.
    pub employee_id: String,
    /// When the employee punched in.
    pub punch_in_time: DateTime<Utc>,
    /// When the employee punched out; `None` while the record is open.
    #[serde(default)]
    pub punch_out_time: Option<DateTime<Utc>>,
    /// Calendar date of the punch-in, used as the grouping key.
    pub date: NaiveDate,
}

impl AttendanceRecord {
    /// Returns true if the employee has not punched out yet.
    pub fn is_open(&self) -> bool {
        self.punch_out_time.is_none()
    }

    /// Returns the worked time for a completed record.
    ///
    /// Open records have no duration. A punch-out recorded before the
    /// punch-in (clock skew) counts as zero.
    pub fn worked_duration(&self) -> Option<Duration> {
        self.punch_out_time
            .map(|out| (out - self.punch_in_time).max(Duration::zero()))
    }
}
