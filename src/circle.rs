//! Station marker circles.
//!
//! A marker is a purely visual disc around the station coordinate; it is
//! not a coverage model.

use geo::{Coord, LineString, Polygon};

use crate::error::{Result, SectorMapError};
use crate::geo_utils::{destination_point, EARTH_RADIUS_M};
use crate::GeoPoint;

/// Default number of sampled bearings for a marker circle.
pub const DEFAULT_CIRCLE_POINTS: u32 = 36;

/// Generate a closed polygon approximating a circle of `radius_m` metres.
///
/// Bearings are sampled uniformly in `[0°, 360°)`, one per point, and the
/// ring is closed by repeating the first coordinate, so the exterior has
/// `num_points + 1` coordinates. Coordinates are `x = longitude`,
/// `y = latitude`.
pub fn generate_circle(center: &GeoPoint, radius_m: f64, num_points: u32) -> Result<Polygon<f64>> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(SectorMapError::invalid_geometry(format!(
            "circle radius must be positive, got {radius_m}"
        )));
    }
    if num_points < 3 {
        return Err(SectorMapError::invalid_geometry(format!(
            "circle needs at least 3 points, got {num_points}"
        )));
    }

    let mut coords: Vec<Coord<f64>> = (0..num_points)
        .map(|i| {
            let bearing = f64::from(i) * 360.0 / f64::from(num_points);
            let p = destination_point(center, bearing, radius_m, EARTH_RADIUS_M);
            Coord {
                x: p.longitude,
                y: p.latitude,
            }
        })
        .collect();
    coords.push(coords[0]);

    Ok(Polygon::new(LineString::new(coords), vec![]))
}
