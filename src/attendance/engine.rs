//! Punch-in/punch-out state machine.
//!
//! An employee is either `Out` (no open record) or `In` (exactly one open
//! record). The state is never stored; it is derived from the employee's
//! most recent record every time it is needed.
//!
//! Actions for the same employee are serialized through a per-employee
//! async mutex, and the open-record state is re-checked immediately before
//! every write so a concurrent writer outside this engine cannot produce a
//! second open record. A mutex only lives in the lock table while some
//! action for that employee holds or awaits it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AttendanceConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee};
use crate::store::EmployeeRecordStore;

use super::{LocationProvider, acquire_position, check_geofence, elapsed_since, format_hms};

/// Whether an employee is currently punched in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "record", rename_all = "snake_case")]
pub enum PunchState {
    /// No open record.
    Out,
    /// Punched in; carries the open record.
    In(AttendanceRecord),
}

/// The derived attendance status of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStatus {
    /// The employee the status is for.
    pub employee_id: String,
    /// Current state.
    #[serde(flatten)]
    pub state: PunchState,
    /// Time since punch-in as `HH:MM:SS`, when punched in.
    pub elapsed: Option<String>,
}

/// Derives an employee's state from the full record list.
///
/// The record with the latest punch-in decides: if it is open the employee
/// is in, otherwise out.
pub fn current_state(records: &[AttendanceRecord], employee_id: &str) -> PunchState {
    records
        .iter()
        .filter(|record| record.employee_id == employee_id)
        .max_by_key(|record| record.punch_in_time)
        .filter(|latest| latest.is_open())
        .map(|latest| PunchState::In(latest.clone()))
        .unwrap_or(PunchState::Out)
}

type LockTable = Mutex<HashMap<String, Arc<AsyncMutex<()>>>>;

/// Exclusive access to one employee's punches.
///
/// Dropping the guard releases the mutex and evicts it from the table when
/// nobody else is waiting on it.
struct EmployeeLock<'a> {
    locks: &'a LockTable,
    employee_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for EmployeeLock<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let idle = locks
            .get(&self.employee_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            locks.remove(&self.employee_id);
        }
    }
}

/// Records punches against an [`EmployeeRecordStore`].
pub struct AttendanceEngine {
    store: Arc<dyn EmployeeRecordStore>,
    config: AttendanceConfig,
    offset: FixedOffset,
    locks: LockTable,
}

impl AttendanceEngine {
    /// Creates an engine, validating the attendance configuration.
    pub fn new(store: Arc<dyn EmployeeRecordStore>, config: AttendanceConfig) -> EngineResult<Self> {
        config.validate()?;
        let offset = config.offset()?;
        Ok(Self {
            store,
            config,
            offset,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Looks the employee up, then waits for exclusive access to their punches.
    ///
    /// Unknown ids fail before touching the lock table.
    async fn lock_employee(&self, employee_id: &str) -> EngineResult<(EmployeeLock<'_>, Employee)> {
        let employee = self.store.get_employee(employee_id)?;
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(
                locks
                    .entry(employee_id.to_string())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        let mut lock = EmployeeLock {
            locks: &self.locks,
            employee_id: employee_id.to_string(),
            guard: None,
        };
        lock.guard = Some(mutex.lock_owned().await);
        Ok((lock, employee))
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or_default()
    }

    fn state_of(&self, employee_id: &str) -> EngineResult<PunchState> {
        let records = self.store.list_attendance_records()?;
        Ok(current_state(&records, employee_id))
    }

    fn require_out(&self, employee_id: &str) -> EngineResult<()> {
        match self.state_of(employee_id)? {
            PunchState::Out => Ok(()),
            PunchState::In(_) => Err(EngineError::AlreadyPunchedIn {
                employee_id: employee_id.to_string(),
            }),
        }
    }

    fn require_in(&self, employee_id: &str) -> EngineResult<AttendanceRecord> {
        match self.state_of(employee_id)? {
            PunchState::In(record) => Ok(record),
            PunchState::Out => Err(EngineError::NotPunchedIn {
                employee_id: employee_id.to_string(),
            }),
        }
    }

    /// Returns the employee's current status.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmployeeNotFound`] if the employee does not exist.
    pub fn status(&self, employee_id: &str, now: DateTime<Utc>) -> EngineResult<AttendanceStatus> {
        self.store.get_employee(employee_id)?;
        let state = self.state_of(employee_id)?;
        let elapsed = match &state {
            PunchState::In(record) => Some(format_hms(elapsed_since(record.punch_in_time, now))),
            PunchState::Out => None,
        };
        Ok(AttendanceStatus {
            employee_id: employee_id.to_string(),
            state,
            elapsed,
        })
    }

    /// Opens a new attendance record for the employee.
    ///
    /// If the employee has a geofence, a position is requested from
    /// `location` (bounded by the configured timeout) and must lie within
    /// the geofence radius.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmployeeNotFound`] if the employee does not exist
    /// - [`EngineError::AlreadyPunchedIn`] if a record is already open
    /// - [`EngineError::LocationPermission`], [`EngineError::LocationUnavailable`]
    ///   or [`EngineError::LocationTimeout`] if no position could be obtained
    /// - [`EngineError::OutOfRange`] if the position is outside the geofence
    pub async fn punch_in(
        &self,
        employee_id: &str,
        location: &dyn LocationProvider,
        now: DateTime<Utc>,
    ) -> EngineResult<AttendanceRecord> {
        let (_lock, employee) = self.lock_employee(employee_id).await?;
        self.require_out(employee_id)?;

        if let Some(fence) = employee.geofence() {
            let position = acquire_position(location, self.config.location_timeout()).await?;
            match check_geofence(fence, position) {
                Ok(distance) => {
                    info!(employee_id = %employee_id, distance_m = distance, "Geofence check passed");
                }
                Err(err) => {
                    warn!(employee_id = %employee_id, error = %err, "Punch-in rejected");
                    return Err(err);
                }
            }
        }

        self.require_out(employee_id)?;
        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            punch_in_time: now,
            punch_out_time: None,
            date: now.with_timezone(&self.offset).date_naive(),
        };
        let saved = self.store.append_attendance_record(record)?;

        info!(
            employee_id = %employee_id,
            record_id = %saved.id,
            date = %saved.date,
            "Punched in"
        );
        Ok(saved)
    }

    /// Closes the employee's open record at `now`.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotPunchedIn`] if the employee has no open record.
    pub async fn punch_out(
        &self,
        employee_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<AttendanceRecord> {
        let (_lock, _) = self.lock_employee(employee_id).await?;
        let mut record = self.require_in(employee_id)?;
        record.punch_out_time = Some(now);
        let saved = self.store.update_attendance_record(record)?;

        info!(
            employee_id = %employee_id,
            record_id = %saved.id,
            worked = %saved.worked_duration().map(format_hms).unwrap_or_default(),
            "Punched out"
        );
        Ok(saved)
    }

    /// Deletes the employee's open record, as if the punch-in never happened.
    ///
    /// Only allowed within the configured undo window after punching in; a
    /// window of zero minutes disables the limit.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotPunchedIn`] if the employee has no open record
    /// - [`EngineError::UndoWindowExpired`] if the punch-in is too old
    pub async fn undo_punch_in(
        &self,
        employee_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<AttendanceRecord> {
        let (_lock, _) = self.lock_employee(employee_id).await?;
        let record = self.require_in(employee_id)?;

        let window = self.config.undo_window_minutes;
        if window > 0 && elapsed_since(record.punch_in_time, now) > Duration::minutes(window) {
            return Err(EngineError::UndoWindowExpired {
                employee_id: employee_id.to_string(),
                minutes: window,
            });
        }

        self.store.delete_attendance_record(&record.id)?;
        info!(employee_id = %employee_id, record_id = %record.id, "Punch-in undone");
        Ok(record)
    }
}
