//! Sector wedge geometry.
//!
//! A sector is drawn as a triangle: the station coordinate plus two rim
//! points projected at `azimuth ± half_width`. This is a display wedge, not
//! an arc-sampled coverage footprint.

use geo::{Coord, LineString, Polygon};

use crate::band::Band;
use crate::geo_utils::{destination_point, EARTH_RADIUS_KM};
use crate::{GeoPoint, SectorConfig};

/// Build the closed 4-point wedge ring `station, rim1, rim2, station`.
///
/// # Example
/// ```
/// use sectormap::{GeoPoint, sector::build_wedge};
/// let wedge = build_wedge(&GeoPoint::new(-23.5, -46.6), 90.0, 30.0, 0.7);
/// assert_eq!(wedge.exterior().0.len(), 4);
/// assert!(wedge.exterior().is_closed());
/// ```
pub fn build_wedge(
    station: &GeoPoint,
    azimuth_deg: f64,
    half_width_deg: f64,
    radius_km: f64,
) -> Polygon<f64> {
    let rim1 = destination_point(
        station,
        azimuth_deg - half_width_deg,
        radius_km,
        EARTH_RADIUS_KM,
    );
    let rim2 = destination_point(
        station,
        azimuth_deg + half_width_deg,
        radius_km,
        EARTH_RADIUS_KM,
    );

    let origin = to_coord(station);
    let ring = vec![origin, to_coord(&rim1), to_coord(&rim2), origin];
    Polygon::new(LineString::new(ring), vec![])
}

/// Sector radius for a band under the given configuration.
pub fn sector_radius_km(band: &Band, config: &SectorConfig) -> f64 {
    band.sector_radius_km(config.default_sector_radius_km)
}

/// Parse a decimal number that may use `,` as the decimal separator.
///
/// `"90,5"` parses as `90.5`. Surrounding whitespace is ignored.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

fn to_coord(p: &GeoPoint) -> Coord<f64> {
    Coord {
        x: p.longitude,
        y: p.latitude,
    }
}
