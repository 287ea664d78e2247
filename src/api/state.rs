//! Application state for the HR engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::attendance::AttendanceEngine;
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::store::EmployeeRecordStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// record store and the attendance engine that serializes punches per
/// employee. The leave grant is read from the store on each allocation run.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EmployeeRecordStore>,
    attendance: Arc<AttendanceEngine>,
    offset: FixedOffset,
}

impl AppState {
    /// Creates a new application state over `store`, using the attendance
    /// settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the attendance configuration is invalid.
    pub fn new(config: &ConfigLoader, store: Arc<dyn EmployeeRecordStore>) -> EngineResult<Self> {
        let attendance_config = config.attendance().clone();
        let offset = attendance_config.offset()?;
        let attendance = AttendanceEngine::new(Arc::clone(&store), attendance_config)?;
        Ok(Self {
            store,
            attendance: Arc::new(attendance),
            offset,
        })
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn EmployeeRecordStore {
        self.store.as_ref()
    }

    /// Returns the attendance engine.
    pub fn attendance(&self) -> &AttendanceEngine {
        &self.attendance
    }

    /// Today's date in the configured UTC offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}
