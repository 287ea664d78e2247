//! Day classification and official working-day counts.
//!
//! Official working days are Monday through Friday. There is no holiday
//! calendar; Saturdays and Sundays are excluded unconditionally.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::YearMonth;

/// Represents the type of day for working-day counting.
///
/// # Example
///
/// ```
/// use hr_engine::payroll::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// # Example
///
/// ```
/// use hr_engine::payroll::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()), DayType::Saturday);
/// // 2026-01-12 is a Monday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Counts the Monday-to-Friday days in `period`.
///
/// # Example
///
/// ```
/// use hr_engine::models::YearMonth;
/// use hr_engine::payroll::official_working_days;
///
/// // January 2026 starts on a Thursday
/// assert_eq!(official_working_days(YearMonth::new(2026, 1).unwrap()), 22);
/// ```
pub fn official_working_days(period: YearMonth) -> u32 {
    let count = period
        .days()
        .filter(|day| get_day_type(*day) == DayType::Weekday)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
