//! In-memory store backed by `RwLock`-guarded vectors.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee, LeaveAllocationSettings};

use super::EmployeeRecordStore;

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
}

/// A process-local [`EmployeeRecordStore`].
///
/// Insertion order is preserved, so listings come back in the order
/// employees and records were added.
///
/// # Example
///
/// ```
/// use hr_engine::models::{Employee, LeaveAllocationSettings, Position};
/// use hr_engine::store::{EmployeeRecordStore, InMemoryStore};
///
/// let store = InMemoryStore::new(LeaveAllocationSettings::default());
/// store.insert_employee(Employee::new("emp_001", "Asha", Position::Ceo, "Board")).unwrap();
/// assert_eq!(store.list_employees().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    settings: LeaveAllocationSettings,
}

impl InMemoryStore {
    /// Creates an empty store with the given leave grant.
    pub fn new(settings: LeaveAllocationSettings) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            settings,
        }
    }

    /// Creates a store pre-populated with employees.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] if two employees share an id.
    pub fn with_employees(
        settings: LeaveAllocationSettings,
        employees: impl IntoIterator<Item = Employee>,
    ) -> EngineResult<Self> {
        let store = Self::new(settings);
        for employee in employees {
            store.insert_employee(employee)?;
        }
        Ok(store)
    }

    /// Adds a new employee, rejecting duplicate ids.
    pub fn insert_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let mut tables = self.write()?;
        if tables.employees.iter().any(|e| e.id == employee.id) {
            return Err(EngineError::validation(
                "id",
                format!("employee '{}' already exists", employee.id),
            ));
        }
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| EngineError::persistence("store lock poisoned"))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| EngineError::persistence("store lock poisoned"))
    }
}

impl EmployeeRecordStore for InMemoryStore {
    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read()?.employees.clone())
    }

    fn get_employee(&self, id: &str) -> EngineResult<Employee> {
        self.read()?
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    fn update_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let mut tables = self.write()?;
        let slot = tables
            .employees
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: employee.id.clone(),
            })?;
        *slot = employee.clone();
        Ok(employee)
    }

    fn list_attendance_records(&self) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self.read()?.attendance.clone())
    }

    fn append_attendance_record(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut tables = self.write()?;
        if tables.attendance.iter().any(|r| r.id == record.id) {
            return Err(EngineError::validation(
                "id",
                format!("attendance record '{}' already exists", record.id),
            ));
        }
        tables.attendance.push(record.clone());
        Ok(record)
    }

    fn update_attendance_record(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut tables = self.write()?;
        let slot = tables
            .attendance
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| EngineError::RecordNotFound {
                id: record.id.clone(),
            })?;
        *slot = record.clone();
        Ok(record)
    }

    fn delete_attendance_record(&self, id: &str) -> EngineResult<()> {
        let mut tables = self.write()?;
        let index = tables
            .attendance
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        tables.attendance.remove(index);
        Ok(())
    }

    fn leave_allocation_settings(&self) -> EngineResult<LeaveAllocationSettings> {
        Ok(self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use chrono::{DateTime, Utc};

    fn store() -> InMemoryStore {
        InMemoryStore::with_employees(
            LeaveAllocationSettings::default(),
            vec![
                Employee::new("emp_001", "Asha", Position::Ceo, "Board"),
                Employee::new("emp_002", "Ravi", Position::Employee, "Sales"),
            ],
        )
        .unwrap()
    }

    fn record(id: &str) -> AttendanceRecord {
        let punch_in: DateTime<Utc> = "2026-01-15T09:00:00Z".parse().unwrap();
        AttendanceRecord {
            id: id.to_string(),
            employee_id: "emp_002".to_string(),
            punch_in_time: punch_in,
            punch_out_time: None,
            date: punch_in.date_naive(),
        }
    }

    #[test]
    fn test_duplicate_ids_are_rejected_at_construction() {
        let result = InMemoryStore::with_employees(
            LeaveAllocationSettings::default(),
            vec![
                Employee::new("dup", "First", Position::Employee, "Sales"),
                Employee::new("dup", "Second", Position::Employee, "Sales"),
            ],
        );

        match result {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "id");
                assert!(message.contains("dup"));
            }
            other => panic!("Expected Validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_update_unknown_employee_is_not_found() {
        let store = store();
        let ghost = Employee::new("emp_999", "Ghost", Position::Intern, "Nowhere");

        match store.update_employee(ghost) {
            Err(EngineError::EmployeeNotFound { id }) => assert_eq!(id, "emp_999"),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_update_employee_replaces_in_place() {
        let store = store();
        let mut ravi = store.get_employee("emp_002").unwrap();
        ravi.department = "Support".to_string();
        store.update_employee(ravi).unwrap();

        let employees = store.list_employees().unwrap();
        assert_eq!(employees[1].department, "Support");
        assert_eq!(employees.len(), 2);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = store();
        let duplicate = Employee::new("emp_001", "Copy", Position::Intern, "Board");
        assert!(store.insert_employee(duplicate).is_err());
    }

    #[test]
    fn test_attendance_record_lifecycle() {
        let store = store();
        store.append_attendance_record(record("att_001")).unwrap();
        assert!(store.append_attendance_record(record("att_001")).is_err());

        let mut closed = record("att_001");
        closed.punch_out_time = Some("2026-01-15T17:00:00Z".parse().unwrap());
        store.update_attendance_record(closed.clone()).unwrap();
        assert_eq!(store.list_attendance_records().unwrap(), vec![closed]);

        store.delete_attendance_record("att_001").unwrap();
        assert!(store.list_attendance_records().unwrap().is_empty());
        assert!(matches!(
            store.delete_attendance_record("att_001"),
            Err(EngineError::RecordNotFound { .. })
        ));
    }
}
