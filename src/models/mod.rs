//! Core data models for the HR engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod leave;
mod payroll;
mod period;

pub use attendance::AttendanceRecord;
pub use employee::{
    Coordinates, Employee, EmployeeStatus, LeaveBalance, Position, WorkLocation,
};
pub use leave::LeaveAllocationSettings;
pub use payroll::{AuditStep, AuditTrace, PayrollReport, PayrollRow};
pub use period::{DateRange, YearMonth};
