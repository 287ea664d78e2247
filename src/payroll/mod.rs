//! Payroll calculation.
//!
//! This module contains working-day counting and the monthly pro-rated
//! salary calculation built on top of attendance records.

mod calculator;
mod working_days;

pub use calculator::{
    PayrollRowResult, attended_days, build_payroll_report, calculate_payroll, calculate_row,
    payroll_from_store,
};
pub use working_days::{DayType, get_day_type, official_working_days};
