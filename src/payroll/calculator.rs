//! Monthly salary pro-rating.
//!
//! Pay for a month is the employee's daily rate (monthly salary divided by the
//! month's official working days) times the number of distinct dates they
//! have attendance records for in that month. A date counts as soon as any
//! record exists for it, whether or not the employee has punched out.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditStep, AuditTrace, Employee, PayrollReport, PayrollRow, YearMonth,
};
use crate::store::EmployeeRecordStore;

use super::official_working_days;

/// The result of pro-rating one employee, including the row and audit step.
#[derive(Debug, Clone)]
pub struct PayrollRowResult {
    /// The payroll row.
    pub row: PayrollRow,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Rounds a money amount to 2 decimal places, half away from zero.
fn money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Counts distinct dates in `period` with at least one record for the employee.
pub fn attended_days(records: &[AttendanceRecord], employee_id: &str, period: YearMonth) -> u32 {
    let dates: HashSet<NaiveDate> = records
        .iter()
        .filter(|record| record.employee_id == employee_id && period.contains(record.date))
        .map(|record| record.date)
        .collect();
    u32::try_from(dates.len()).unwrap_or(u32::MAX)
}

fn salary_overflow(employee_id: &str) -> EngineError {
    EngineError::validation(
        "base_salary",
        format!("pay for employee '{}' exceeds the representable amount", employee_id),
    )
}

/// Calculates one employee's payroll row for `period`.
///
/// Employees without a positive salary get an explicit all-zero row.
///
/// # Errors
///
/// [`EngineError::Validation`] on `base_salary` if the pro-rated amount does
/// not fit in a [`Decimal`].
///
/// # Arguments
///
/// * `employee` - The employee to pay
/// * `records` - Attendance records; records for other employees are ignored
/// * `period` - The month being paid
/// * `working_days` - Official working days in `period`
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_row(
    employee: &Employee,
    records: &[AttendanceRecord],
    period: YearMonth,
    working_days: u32,
    step_number: u32,
) -> EngineResult<PayrollRowResult> {
    let Some(salary) = employee.configured_salary() else {
        let row = PayrollRow {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            base_monthly_salary: money(Decimal::ZERO),
            official_working_days: working_days,
            attended_days: 0,
            payable_salary: money(Decimal::ZERO),
        };
        let audit_step = AuditStep {
            step_number,
            rule_id: "no_salary_configured".to_string(),
            rule_name: "No Salary Configured".to_string(),
            input: serde_json::json!({
                "employee_id": employee.id,
                "base_salary": employee.base_salary.map(|s| s.to_string()),
            }),
            output: serde_json::json!({
                "payable_salary": row.payable_salary.to_string(),
            }),
            reasoning: format!(
                "Employee '{}' has no positive base salary; paying zero",
                employee.id
            ),
        };
        return Ok(PayrollRowResult { row, audit_step });
    };

    let attended = attended_days(records, &employee.id, period);
    let daily_rate = if working_days == 0 {
        Decimal::ZERO
    } else {
        salary
            .checked_div(Decimal::from(working_days))
            .ok_or_else(|| salary_overflow(&employee.id))?
    };
    let payable = daily_rate
        .checked_mul(Decimal::from(attended))
        .map(money)
        .ok_or_else(|| salary_overflow(&employee.id))?;

    let row = PayrollRow {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        base_monthly_salary: money(salary),
        official_working_days: working_days,
        attended_days: attended,
        payable_salary: payable,
    };
    let audit_step = AuditStep {
        step_number,
        rule_id: "pro_rata_salary".to_string(),
        rule_name: "Pro-rata Salary".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "base_salary": salary.to_string(),
            "official_working_days": working_days,
            "attended_days": attended,
        }),
        output: serde_json::json!({
            "daily_rate": money(daily_rate).to_string(),
            "payable_salary": payable.to_string(),
        }),
        reasoning: format!(
            "{} / {} working days x {} attended days = {}",
            salary, working_days, attended, payable
        ),
    };

    Ok(PayrollRowResult { row, audit_step })
}

/// Calculates payroll rows for every employee for one calendar month.
///
/// Rows come back in the same order as `employees`; nobody is omitted.
///
/// # Errors
///
/// [`EngineError::Validation`] if `year`/`month` is not a calendar month.
///
/// [`EngineError::Validation`]: crate::error::EngineError::Validation
///
/// # Example
///
/// ```
/// use hr_engine::models::{Employee, Position};
/// use hr_engine::payroll::calculate_payroll;
/// use rust_decimal::Decimal;
///
/// let mut asha = Employee::new("emp_001", "Asha", Position::Employee, "Sales");
/// asha.base_salary = Some(Decimal::new(66000, 0));
///
/// let rows = calculate_payroll(&[asha], &[], 2026, 1).unwrap();
/// assert_eq!(rows[0].official_working_days, 22);
/// assert_eq!(rows[0].payable_salary, Decimal::ZERO);
/// ```
pub fn calculate_payroll(
    employees: &[Employee],
    records: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> EngineResult<Vec<PayrollRow>> {
    Ok(build_payroll_report(employees, records, year, month)?.rows)
}

/// Calculates a full [`PayrollReport`], including totals and audit trace.
///
/// # Errors
///
/// [`EngineError::Validation`] for an invalid month, or when a salary is so
/// large that its pro-rated pay or the total overflows.
pub fn build_payroll_report(
    employees: &[Employee],
    records: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> EngineResult<PayrollReport> {
    let start_time = Instant::now();
    let period = YearMonth::new(year, month)?;
    let working_days = official_working_days(period);

    let mut steps = vec![AuditStep {
        step_number: 1,
        rule_id: "official_working_days".to_string(),
        rule_name: "Official Working Days".to_string(),
        input: serde_json::json!({ "period": period.to_string() }),
        output: serde_json::json!({ "official_working_days": working_days }),
        reasoning: format!(
            "{} has {} Monday-to-Friday days",
            period, working_days
        ),
    }];

    let mut rows = Vec::with_capacity(employees.len());
    for (index, employee) in employees.iter().enumerate() {
        let step_number = u32::try_from(index + 2).unwrap_or(u32::MAX);
        let result = calculate_row(employee, records, period, working_days, step_number)?;
        rows.push(result.row);
        steps.push(result.audit_step);
    }

    let total_payable = rows
        .iter()
        .try_fold(Decimal::ZERO, |total, row| total.checked_add(row.payable_salary))
        .map(money)
        .ok_or_else(|| {
            EngineError::validation("base_salary", "total payroll exceeds the representable amount")
        })?;
    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);

    info!(
        period = %period,
        employees = rows.len(),
        total_payable = %total_payable,
        duration_us,
        "Payroll calculated"
    );

    Ok(PayrollReport {
        report_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period,
        official_working_days: working_days,
        rows,
        total_payable,
        audit_trace: AuditTrace { steps, duration_us },
    })
}

/// Calculates the report from a fresh snapshot of the store.
pub fn payroll_from_store(
    store: &dyn EmployeeRecordStore,
    year: i32,
    month: u32,
) -> EngineResult<PayrollReport> {
    let employees = store.list_employees()?;
    let records = store.list_attendance_records()?;
    build_payroll_report(&employees, &records, year, month)
}
