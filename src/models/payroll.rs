//! Payroll report models.
//!
//! This module contains the [`PayrollReport`] type and its associated structures
//! that capture the output of a monthly payroll run, including one row per
//! employee and an audit trace explaining each pro-rating decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::YearMonth;

/// The payable salary for one employee in one calendar month.
///
/// # Example
///
/// ```
/// use hr_engine::models::PayrollRow;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let row = PayrollRow {
///     employee_id: "emp_001".to_string(),
///     employee_name: "Asha".to_string(),
///     base_monthly_salary: Decimal::from_str("66000.00").unwrap(),
///     official_working_days: 22,
///     attended_days: 11,
///     payable_salary: Decimal::from_str("33000.00").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// The employee this row pays.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Monthly gross salary, rounded to 2 decimal places; zero when unset.
    pub base_monthly_salary: Decimal,
    /// Monday-to-Friday days in the month.
    pub official_working_days: u32,
    /// Distinct dates with at least one attendance record in the month.
    pub attended_days: u32,
    /// Pro-rated salary, rounded to 2 decimal places.
    pub payable_salary: Decimal,
}

/// A single step in the audit trace recording a payroll decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a monthly payroll run.
///
/// Every employee in the snapshot appears in `rows`, including those
/// without a configured salary, in the order the store returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this run.
    pub report_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The month being paid.
    pub period: YearMonth,
    /// Monday-to-Friday days in the month.
    pub official_working_days: u32,
    /// One row per employee.
    pub rows: Vec<PayrollRow>,
    /// Sum of every row's payable salary.
    pub total_payable: Decimal,
    /// Complete audit trace of payroll decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_payroll_row_serializes_money_as_strings() {
        let row = PayrollRow {
            employee_id: "emp_001".to_string(),
            employee_name: "Asha".to_string(),
            base_monthly_salary: dec("66000.00"),
            official_working_days: 22,
            attended_days: 11,
            payable_salary: dec("33000.00"),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["payable_salary"], "33000.00");
        assert_eq!(json["base_monthly_salary"], "66000.00");
        assert_eq!(json["attended_days"], 11);
    }

    #[test]
    fn test_report_serializes_period_as_token() {
        let report = PayrollReport {
            report_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            period: YearMonth::new(2026, 1).unwrap(),
            official_working_days: 22,
            rows: vec![],
            total_payable: Decimal::ZERO,
            audit_trace: AuditTrace {
                steps: vec![],
                duration_us: 0,
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["period"], "2026-01");
        assert!(json["rows"].as_array().unwrap().is_empty());
    }
}
