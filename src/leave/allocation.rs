//! Monthly leave allocation.
//!
//! On the first run in a calendar month every employee's leave balance is
//! reset: eligible employees receive exactly the configured grant, while
//! interns and employees on probation or notice get zero. Unused days do not
//! carry over. Each employee is stamped with the period it was processed for,
//! so running the allocation again in the same month changes nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::{Employee, LeaveAllocationSettings, LeaveBalance, YearMonth};
use crate::store::EmployeeRecordStore;

/// An employee whose update could not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationFailure {
    /// The employee that was not updated.
    pub employee_id: String,
    /// Why the update failed.
    pub message: String,
}

/// The outcome of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// The period the run allocated for.
    pub period: YearMonth,
    /// Employees whose balance was reset to the configured grant.
    pub granted: Vec<String>,
    /// Ineligible employees whose balance was reset to zero.
    pub zeroed: Vec<String>,
    /// Employees already processed for this period.
    pub skipped: Vec<String>,
    /// Employees whose update failed; the rest of the batch still ran.
    pub failed: Vec<AllocationFailure>,
}

impl AllocationReport {
    fn new(period: YearMonth) -> Self {
        Self {
            period,
            granted: Vec::new(),
            zeroed: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Computes an employee's state after allocation for `period`.
///
/// Returns `None` when the employee was already processed for `period`.
///
/// # Example
///
/// ```
/// use hr_engine::leave::allocate_for_period;
/// use hr_engine::models::{Employee, LeaveAllocationSettings, LeaveBalance, Position, YearMonth};
///
/// let settings = LeaveAllocationSettings { short_leave: 5, sick_leave: 2, personal_leave: 1 };
/// let period = YearMonth::new(2026, 10).unwrap();
/// let employee = Employee::new("emp_001", "Asha", Position::Employee, "Sales");
///
/// let updated = allocate_for_period(&employee, &settings, period).unwrap();
/// assert_eq!(updated.leave_balance, LeaveBalance { short: 5, sick: 2, personal: 1 });
/// assert_eq!(updated.last_leave_allocation, Some(period));
///
/// assert!(allocate_for_period(&updated, &settings, period).is_none());
/// ```
pub fn allocate_for_period(
    employee: &Employee,
    settings: &LeaveAllocationSettings,
    period: YearMonth,
) -> Option<Employee> {
    if employee.last_leave_allocation == Some(period) {
        return None;
    }

    let mut updated = employee.clone();
    updated.leave_balance = if employee.is_leave_eligible() {
        settings.as_balance()
    } else {
        LeaveBalance::ZERO
    };
    updated.last_leave_allocation = Some(period);
    Some(updated)
}

/// Resets leave balances for every employee not yet processed this month.
///
/// The period is the calendar month containing `today`. Each employee is
/// re-read immediately before writing and skipped if another run has stamped
/// it in the meantime. A failed update is logged and recorded in the report;
/// it does not stop the remaining employees from being processed.
///
/// # Errors
///
/// Returns an error only if the employee list itself cannot be read.
pub fn process_monthly_allocation(
    store: &dyn EmployeeRecordStore,
    settings: &LeaveAllocationSettings,
    today: NaiveDate,
) -> EngineResult<AllocationReport> {
    let period = YearMonth::from_date(today);
    let employees = store.list_employees()?;
    let mut report = AllocationReport::new(period);

    for employee in &employees {
        if employee.last_leave_allocation == Some(period) {
            report.skipped.push(employee.id.clone());
            continue;
        }

        match allocate_one(store, &employee.id, settings, period) {
            Ok(Some(updated)) => {
                if updated.is_leave_eligible() {
                    report.granted.push(updated.id);
                } else {
                    report.zeroed.push(updated.id);
                }
            }
            Ok(None) => report.skipped.push(employee.id.clone()),
            Err(err) => {
                warn!(
                    employee_id = %employee.id,
                    period = %period,
                    error = %err,
                    "Leave allocation failed for employee"
                );
                report.failed.push(AllocationFailure {
                    employee_id: employee.id.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        period = %period,
        granted = report.granted.len(),
        zeroed = report.zeroed.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Monthly leave allocation completed"
    );

    Ok(report)
}

/// Runs [`process_monthly_allocation`] with the store's configured grant.
pub fn run_monthly_allocation(
    store: &dyn EmployeeRecordStore,
    today: NaiveDate,
) -> EngineResult<AllocationReport> {
    let settings = store.leave_allocation_settings()?;
    process_monthly_allocation(store, &settings, today)
}

fn allocate_one(
    store: &dyn EmployeeRecordStore,
    employee_id: &str,
    settings: &LeaveAllocationSettings,
    period: YearMonth,
) -> EngineResult<Option<Employee>> {
    let current = store.get_employee(employee_id)?;
    match allocate_for_period(&current, settings, period) {
        Some(updated) => store.update_employee(updated).map(Some),
        None => Ok(None),
    }
}
