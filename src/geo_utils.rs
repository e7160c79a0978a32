//! Spherical-Earth geodesy helpers.
//!
//! All public functions take and return degrees; trigonometry happens in
//! radians internally. The Earth is modelled as a sphere of radius
//! [`EARTH_RADIUS_KM`].

use crate::{Bounds, GeoPoint};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle destination from `origin` along `bearing_deg` for `distance`.
///
/// `distance` and `earth_radius` must share a unit; only their ratio (the
/// angular distance) enters the formula.
pub fn destination_point(
    origin: &GeoPoint,
    bearing_deg: f64,
    distance: f64,
    earth_radius: f64,
) -> GeoPoint {
    let angular = distance / earth_radius;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Project a point `distance_km` along `bearing_deg` from `(lat, lon)`.
///
/// Returns `(lat2, lon2)` in degrees. Pure numeric function: the caller
/// supplies a finite bearing and a non-negative distance.
///
/// # Example
/// ```
/// use sectormap::geo_utils::project;
/// let (lat, lon) = project(0.0, 0.0, 90.0, 111.195);
/// assert!(lat.abs() < 1e-9);
/// assert!((lon - 1.0).abs() < 1e-3);
/// ```
pub fn project(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
    let p = destination_point(
        &GeoPoint::new(lat, lon),
        bearing_deg,
        distance_km,
        EARTH_RADIUS_KM,
    );
    (p.latitude, p.longitude)
}

/// Haversine distance between two points in metres.
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Bounding box of a set of points. Empty input yields a zero box.
pub fn compute_bounds(points: &[GeoPoint]) -> Bounds {
    Bounds::from_points(points).unwrap_or(Bounds {
        min_lat: 0.0,
        max_lat: 0.0,
        min_lng: 0.0,
        max_lng: 0.0,
    })
}
