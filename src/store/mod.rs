//! Employee record store.
//!
//! The engines never talk to a database directly. They read snapshots from,
//! and write single records back to, an [`EmployeeRecordStore`]; the
//! deployment decides what backs it. [`InMemoryStore`] ships with the crate.

mod memory;

pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee, LeaveAllocationSettings};

/// Persistence operations the engines depend on.
///
/// Implementations return [`EngineError::EmployeeNotFound`] or
/// [`EngineError::RecordNotFound`] for unknown ids and
/// [`EngineError::Persistence`] when the backend fails.
///
/// [`EngineError::EmployeeNotFound`]: crate::error::EngineError::EmployeeNotFound
/// [`EngineError::RecordNotFound`]: crate::error::EngineError::RecordNotFound
/// [`EngineError::Persistence`]: crate::error::EngineError::Persistence
pub trait EmployeeRecordStore: Send + Sync {
    /// Returns every employee.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns one employee by id.
    fn get_employee(&self, id: &str) -> EngineResult<Employee>;

    /// Replaces an existing employee and returns the stored value.
    fn update_employee(&self, employee: Employee) -> EngineResult<Employee>;

    /// Returns every attendance record.
    fn list_attendance_records(&self) -> EngineResult<Vec<AttendanceRecord>>;

    /// Stores a new attendance record.
    fn append_attendance_record(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord>;

    /// Replaces an existing attendance record.
    fn update_attendance_record(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord>;

    /// Removes an attendance record.
    fn delete_attendance_record(&self, id: &str) -> EngineResult<()>;

    /// Returns the configured monthly leave grant.
    fn leave_allocation_settings(&self) -> EngineResult<LeaveAllocationSettings>;
}
