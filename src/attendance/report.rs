//! Attendance reporting: tabular rows and per-employee summaries.
//!
//! Only completed records (with a punch-out) contribute worked time. A day
//! worked is counted once per employee per date, however many punches it has.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, DateRange};

use super::format_hms;

/// Label shown in place of a duration for records still open.
pub const IN_PROGRESS_LABEL: &str = "in progress";

/// One attendance record prepared for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    /// The record this row shows.
    pub record_id: String,
    /// The employee who punched.
    pub employee_id: String,
    /// Calendar date of the punch-in.
    pub date: NaiveDate,
    /// When the employee punched in.
    pub punch_in_time: DateTime<Utc>,
    /// When the employee punched out, if they have.
    pub punch_out_time: Option<DateTime<Utc>>,
    /// `HH:MM:SS` for completed records, [`IN_PROGRESS_LABEL`] otherwise.
    pub duration: String,
}

/// Worked time for one employee over a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee summarised.
    pub employee_id: String,
    /// Distinct dates with at least one completed record.
    pub days_worked: u32,
    /// Sum of completed record durations, in seconds.
    pub total_seconds: i64,
    /// The same total as `HH:MM:SS`.
    pub total_duration: String,
    /// Records in the window that are still open.
    pub open_records: u32,
}

/// Builds table rows for records dated inside `window`.
///
/// Rows are ordered by date, then punch-in time.
pub fn attendance_rows(records: &[AttendanceRecord], window: &DateRange) -> Vec<AttendanceRow> {
    let mut rows: Vec<AttendanceRow> = records
        .iter()
        .filter(|record| window.contains(record.date))
        .map(|record| AttendanceRow {
            record_id: record.id.clone(),
            employee_id: record.employee_id.clone(),
            date: record.date,
            punch_in_time: record.punch_in_time,
            punch_out_time: record.punch_out_time,
            duration: record
                .worked_duration()
                .map(format_hms)
                .unwrap_or_else(|| IN_PROGRESS_LABEL.to_string()),
        })
        .collect();
    rows.sort_by(|a, b| (a.date, a.punch_in_time).cmp(&(b.date, b.punch_in_time)));
    rows
}

#[derive(Default)]
struct Tally {
    dates: BTreeSet<NaiveDate>,
    total: Duration,
    open: u32,
}

/// Summarises worked days and time per employee for records inside `window`.
///
/// Employees are returned in id order. An employee whose only records in the
/// window are open still appears, with zero days and zero time.
///
/// # Example
///
/// ```
/// use hr_engine::attendance::summarize_attendance;
/// use hr_engine::models::{AttendanceRecord, DateRange};
/// use chrono::{DateTime, Duration, NaiveDate, Utc};
///
/// let start: DateTime<Utc> = "2026-01-15T09:00:00Z".parse().unwrap();
/// let records = vec![
///     AttendanceRecord {
///         id: "a".to_string(),
///         employee_id: "emp_001".to_string(),
///         punch_in_time: start,
///         punch_out_time: Some(start + Duration::hours(4)),
///         date: start.date_naive(),
///     },
///     AttendanceRecord {
///         id: "b".to_string(),
///         employee_id: "emp_001".to_string(),
///         punch_in_time: start + Duration::hours(5),
///         punch_out_time: Some(start + Duration::hours(8)),
///         date: start.date_naive(),
///     },
/// ];
/// let day = start.date_naive();
/// let window = DateRange::new(day, day).unwrap();
///
/// let summary = summarize_attendance(&records, &window);
/// assert_eq!(summary[0].days_worked, 1);
/// assert_eq!(summary[0].total_duration, "07:00:00");
/// ```
pub fn summarize_attendance(
    records: &[AttendanceRecord],
    window: &DateRange,
) -> Vec<AttendanceSummary> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for record in records.iter().filter(|r| window.contains(r.date)) {
        let tally = tallies.entry(record.employee_id.as_str()).or_default();
        match record.worked_duration() {
            Some(worked) => {
                tally.dates.insert(record.date);
                tally.total = tally.total + worked;
            }
            None => tally.open += 1,
        }
    }

    tallies
        .into_iter()
        .map(|(employee_id, tally)| AttendanceSummary {
            employee_id: employee_id.to_string(),
            days_worked: u32::try_from(tally.dates.len()).unwrap_or(u32::MAX),
            total_seconds: tally.total.num_seconds(),
            total_duration: format_hms(tally.total),
            open_records: tally.open,
        })
        .collect()
}
