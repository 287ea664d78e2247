//! Leave management.
//!
//! Currently covers the idempotent monthly balance reset. Deducting leave on
//! approval belongs to the leave-request workflow and is not handled here.

mod allocation;

pub use allocation::{
    AllocationFailure, AllocationReport, allocate_for_period, process_monthly_allocation,
    run_monthly_allocation,
};
