//! Employee model and related types.
//!
//! This module defines the [`Employee`] record shared by every engine, the
//! ordered [`Position`] rank used by the hierarchy builder, and the leave and
//! geofence value types hanging off an employee.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::YearMonth;

/// An employee's rank within the organisation.
///
/// Positions form a single total order:
/// `Intern < Employee < Dept. Head < Manager < CEO`. The legacy labels
/// `Worker` and `TL` are accepted and map onto `Employee` and `Dept. Head`.
///
/// # Example
///
/// ```
/// use hr_engine::models::Position;
///
/// assert!(Position::Manager > Position::DeptHead);
/// assert_eq!("TL".parse::<Position>().unwrap(), Position::DeptHead);
/// assert_eq!(Position::Ceo.rank(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Entry level, below regular employees.
    Intern,
    /// Regular employee.
    #[serde(alias = "Worker")]
    Employee,
    /// Head of a department.
    #[serde(rename = "Dept. Head", alias = "TL", alias = "Team Lead")]
    DeptHead,
    /// Manager of one or more departments.
    Manager,
    /// Chief executive.
    #[serde(rename = "CEO")]
    Ceo,
}

impl Position {
    /// All positions in ascending rank order.
    pub const ALL: [Position; 5] = [
        Position::Intern,
        Position::Employee,
        Position::DeptHead,
        Position::Manager,
        Position::Ceo,
    ];

    /// Returns the ordinal of this position; higher is more senior.
    pub const fn rank(self) -> u8 {
        match self {
            Position::Intern => 0,
            Position::Employee => 1,
            Position::DeptHead => 2,
            Position::Manager => 3,
            Position::Ceo => 4,
        }
    }

    /// Returns the display label for this position.
    pub const fn label(self) -> &'static str {
        match self {
            Position::Intern => "Intern",
            Position::Employee => "Employee",
            Position::DeptHead => "Dept. Head",
            Position::Manager => "Manager",
            Position::Ceo => "CEO",
        }
    }

    /// Returns true if this position is strictly more senior than `other`.
    pub fn outranks(self, other: Position) -> bool {
        self.rank() > other.rank()
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Intern" => Ok(Position::Intern),
            "Employee" | "Worker" => Ok(Position::Employee),
            "Dept. Head" | "TL" | "Team Lead" => Ok(Position::DeptHead),
            "Manager" => Ok(Position::Manager),
            "CEO" => Ok(Position::Ceo),
            other => Err(EngineError::validation(
                "position",
                format!("unknown position '{}'", other),
            )),
        }
    }
}

/// Employment status, which drives leave eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Working normally.
    #[default]
    Active,
    /// Currently on leave.
    #[serde(rename = "On Leave")]
    OnLeave,
    /// Still within the probation period.
    Probation,
    /// Serving a notice period.
    #[serde(rename = "Notice Period")]
    NoticePeriod,
}

/// Remaining leave days per leave type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Short leave days.
    pub short: u32,
    /// Sick leave days.
    pub sick: u32,
    /// Personal leave days.
    pub personal: u32,
}

impl LeaveBalance {
    /// A balance with every counter at zero.
    pub const ZERO: LeaveBalance = LeaveBalance {
        short: 0,
        sick: 0,
        personal: 0,
    };
}

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
}

/// The geofence an employee must be inside to punch in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkLocation {
    /// Latitude of the work site.
    pub latitude: f64,
    /// Longitude of the work site.
    pub longitude: f64,
    /// Allowed distance from the work site, in meters.
    pub radius_meters: f64,
}

impl WorkLocation {
    /// Returns the center of the geofence.
    pub fn center(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Represents an employee record as held by the employee store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Rank used to place the employee in the hierarchy.
    pub position: Position,
    /// Department label; compared exactly.
    #[serde(default)]
    pub department: String,
    /// Current employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Remaining leave.
    #[serde(default)]
    pub leave_balance: LeaveBalance,
    /// The last period this employee's leave balance was reset for.
    #[serde(default)]
    pub last_leave_allocation: Option<YearMonth>,
    /// Optional geofence restricting where the employee may punch in.
    #[serde(default)]
    pub work_location: Option<WorkLocation>,
    /// Monthly gross pay.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Assigned shift, if any.
    #[serde(default)]
    pub shift_id: Option<String>,
}

impl Employee {
    /// Returns true if the employee holds the CEO rank.
    pub fn is_ceo(&self) -> bool {
        self.position == Position::Ceo
    }

    /// Returns the geofence if one is configured with a positive radius.
    pub fn geofence(&self) -> Option<&WorkLocation> {
        self.work_location
            .as_ref()
            .filter(|location| location.radius_meters > 0.0)
    }

    /// Returns the monthly salary if one is configured and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::{Employee, Position};
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee::new("emp_001", "Asha", Position::Employee, "Sales");
    /// assert_eq!(employee.configured_salary(), None);
    ///
    /// employee.base_salary = Some(Decimal::new(66000, 0));
    /// assert_eq!(employee.configured_salary(), Some(Decimal::new(66000, 0)));
    /// ```
    pub fn configured_salary(&self) -> Option<Decimal> {
        self.base_salary.filter(|salary| *salary > Decimal::ZERO)
    }

    /// Returns true if the employee should receive a leave grant.
    ///
    /// Interns and employees on probation or serving notice get nothing.
    pub fn is_leave_eligible(&self) -> bool {
        self.position != Position::Intern
            && !matches!(
                self.status,
                EmployeeStatus::Probation | EmployeeStatus::NoticePeriod
            )
    }

    /// Creates an active employee with no leave, geofence or salary.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            department: department.into(),
            status: EmployeeStatus::Active,
            leave_balance: LeaveBalance::ZERO,
            last_leave_allocation: None,
            work_location: None,
            base_salary: None,
            shift_id: None,
        }
    }
}
