//! Geofence checks for punch-in.
//!
//! Distances are great-circle distances computed with the haversine formula
//! on a spherical Earth of radius 6,371 km.

use crate::error::{EngineError, EngineResult};
use crate::models::{Coordinates, WorkLocation};

/// Mean Earth radius used for distance calculations, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Returns the great-circle distance between two points, in meters.
///
/// # Example
///
/// ```
/// use hr_engine::attendance::haversine_distance;
/// use hr_engine::models::Coordinates;
///
/// let a = Coordinates { latitude: 0.0, longitude: 0.0 };
/// let b = Coordinates { latitude: 0.0, longitude: 1.0 };
/// let d = haversine_distance(a, b);
/// assert!((d - 111_194.9).abs() < 1.0);
/// ```
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Rejects coordinates outside the valid latitude/longitude ranges.
pub fn validate_coordinates(position: Coordinates) -> EngineResult<()> {
    if !position.latitude.is_finite() || !(-90.0..=90.0).contains(&position.latitude) {
        return Err(EngineError::validation(
            "latitude",
            format!("{} is outside -90..=90", position.latitude),
        ));
    }
    if !position.longitude.is_finite() || !(-180.0..=180.0).contains(&position.longitude) {
        return Err(EngineError::validation(
            "longitude",
            format!("{} is outside -180..=180", position.longitude),
        ));
    }
    Ok(())
}

/// Checks that `position` lies within the work location's radius.
///
/// Returns the computed distance on success and
/// [`EngineError::OutOfRange`] carrying both the distance and the allowed
/// radius otherwise. A point exactly on the boundary is inside.
pub fn check_geofence(location: &WorkLocation, position: Coordinates) -> EngineResult<f64> {
    validate_coordinates(position)?;

    let distance = haversine_distance(location.center(), position);
    if distance > location.radius_meters {
        return Err(EngineError::OutOfRange {
            distance_meters: distance,
            radius_meters: location.radius_meters,
        });
    }
    Ok(distance)
}
