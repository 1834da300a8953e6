use crate::models::BoundingBox;
use thiserror::Error;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rejection reasons for caller-supplied coordinates
#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("coordinates must be [longitude, latitude], got {0} values")]
    WrongArity(usize),

    #[error("longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),

    #[error("latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
}

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for caller-facing output
#[inline]
pub fn round_km(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}

/// Validate a caller-supplied [longitude, latitude] pair
///
/// Returns the (latitude, longitude) tuple on success. Rejected before any
/// directory query is issued.
pub fn validate_coordinates(coordinates: &[f64]) -> Result<(f64, f64), CoordinateError> {
    if coordinates.len() != 2 {
        return Err(CoordinateError::WrongArity(coordinates.len()));
    }

    let (longitude, latitude) = (coordinates[0], coordinates[1]);

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(CoordinateError::LongitudeOutOfRange(longitude));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(CoordinateError::LatitudeOutOfRange(latitude));
    }

    Ok((latitude, longitude))
}

/// Calculate a bounding box around a center point
///
/// This is how radius constraints are expressed to the directory, which
/// exposes plain range filters on the coordinate fields.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}
