//! HTTP API module for the HR engine.
//!
//! This module exposes the hierarchy, leave allocation, attendance and
//! payroll operations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{AttendanceSummaryResponse, create_router};
pub use request::{LocationErrorKind, PunchInRequest, SummaryQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
