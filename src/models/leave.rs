//! Leave allocation settings.

use serde::{Deserialize, Serialize};

use super::LeaveBalance;

/// Monthly leave grant applied to every eligible employee.
///
/// The grant replaces the previous balance; it is not added to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveAllocationSettings {
    /// Short leave days granted per month.
    pub short_leave: u32,
    /// Sick leave days granted per month.
    pub sick_leave: u32,
    /// Personal leave days granted per month.
    pub personal_leave: u32,
}

impl LeaveAllocationSettings {
    /// The balance an eligible employee holds right after allocation.
    pub fn as_balance(&self) -> LeaveBalance {
        LeaveBalance {
            short: self.short_leave,
            sick: self.sick_leave,
            personal: self.personal_leave,
        }
    }
}
