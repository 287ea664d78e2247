//! Calendar period types.
//!
//! This module contains [`YearMonth`], the `YYYY-MM` token used to mark leave
//! allocation periods and to select payroll months, and [`DateRange`], the
//! inclusive date window used for attendance reporting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month, serialized as `YYYY-MM`.
///
/// # Example
///
/// ```
/// use hr_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let period: YearMonth = "2024-08".parse().unwrap();
/// assert_eq!(period.to_string(), "2024-08");
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 8, 31).unwrap());
/// assert!(period.contains(NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Creates a period, rejecting months outside 1..=12 and unrepresentable years.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::validation(
                "month",
                format!("{}-{} is not a valid calendar month", year, month),
            )
        })?;
        Ok(Self { first_day })
    }

    /// Returns the month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Iterates every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last_day();
        self.first_day.iter_days().take_while(move |day| *day <= last)
    }

    /// Returns true if `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The whole month as an inclusive [`DateRange`].
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.first_day,
            end: self.last_day(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::validation("period", format!("expected YYYY-MM, got '{}'", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// An inclusive window of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first date in the window (inclusive).
    pub start: NaiveDate,
    /// The last date in the window (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a window, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::validation(
                "end",
                format!("end date {} is before start date {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    /// Checks if a given date falls within this window.
    ///
    /// The check is inclusive of both start and end dates.
    ///
    /// # Example
    ///
    /// ```
    /// use hr_engine::models::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let window = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// assert!(window.contains(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap())); // start date
    /// assert!(window.contains(NaiveDate::from_ymd_opt(2026, 1, 26).unwrap())); // end date
    /// assert!(!window.contains(NaiveDate::from_ymd_opt(2026, 1, 27).unwrap())); // after
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
