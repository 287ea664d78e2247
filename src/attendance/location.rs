//! Location acquisition for geofenced punch-in.
//!
//! Getting a position fix may wait on the user granting permission, so it
//! is asynchronous and always bounded by a timeout.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Coordinates;

/// Source of the punching user's current position.
///
/// Implementations return [`EngineError::LocationPermission`] when the user
/// refuses access and [`EngineError::LocationUnavailable`] when no fix can be
/// obtained.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Resolves the current position.
    async fn current_position(&self) -> EngineResult<Coordinates>;
}

/// A position, or a failure, already reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportedLocation {
    /// The client obtained a fix.
    Position(Coordinates),
    /// The user denied location access.
    PermissionDenied,
    /// The device could not determine a position.
    Unavailable,
    /// The client sent nothing.
    NotReported,
}

#[async_trait]
impl LocationProvider for ReportedLocation {
    async fn current_position(&self) -> EngineResult<Coordinates> {
        match self {
            ReportedLocation::Position(position) => Ok(*position),
            ReportedLocation::PermissionDenied => Err(EngineError::LocationPermission),
            ReportedLocation::Unavailable => Err(EngineError::LocationUnavailable {
                message: "the device could not determine a position".to_string(),
            }),
            ReportedLocation::NotReported => Err(EngineError::LocationUnavailable {
                message: "no position was reported".to_string(),
            }),
        }
    }
}

/// Asks `provider` for a position, giving up after `timeout`.
pub async fn acquire_position(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> EngineResult<Coordinates> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(EngineError::LocationTimeout {
            timeout_secs: timeout.as_secs(),
        }),
    }
}
