//! Tests for marker circles and sector wedges

use sectormap::geo_utils::haversine_distance;
use sectormap::sector::{build_wedge, parse_decimal};
use sectormap::{generate_circle, GeoPoint, SectorMapError};

fn station() -> GeoPoint {
    GeoPoint::new(-23.5, -46.6)
}

fn to_point(c: &geo::Coord<f64>) -> GeoPoint {
    GeoPoint::new(c.y, c.x)
}

#[test]
fn test_circle_points_at_radius() {
    let circle = generate_circle(&station(), 20.0, 36).unwrap();
    for c in &circle.exterior().0 {
        let d = haversine_distance(&station(), &to_point(c));
        assert!((d - 20.0).abs() < 1e-6, "point at {d}m");
    }
}

#[test]
fn test_circle_ring_is_closed() {
    let circle = generate_circle(&station(), 50.0, 36).unwrap();
    let ring = &circle.exterior().0;
    assert_eq!(ring.len(), 37);
    assert_eq!(ring.first(), ring.last());
    assert!(circle.exterior().is_closed());
}

#[test]
fn test_circle_first_point_due_north() {
    let circle = generate_circle(&station(), 100.0, 4).unwrap();
    let north = to_point(&circle.exterior().0[0]);
    assert!(north.latitude > station().latitude);
    assert!((north.longitude - station().longitude).abs() < 1e-12);
}

#[test]
fn test_circle_rejects_bad_parameters() {
    assert!(matches!(
        generate_circle(&station(), 0.0, 36),
        Err(SectorMapError::InvalidGeometry { .. })
    ));
    assert!(matches!(
        generate_circle(&station(), -5.0, 36),
        Err(SectorMapError::InvalidGeometry { .. })
    ));
    assert!(matches!(
        generate_circle(&station(), 20.0, 2),
        Err(SectorMapError::InvalidGeometry { .. })
    ));
}

#[test]
fn test_wedge_has_four_points_and_is_closed() {
    for azimuth in [0.0, 90.0, 180.0, 359.5, -30.0, 400.0] {
        let wedge = build_wedge(&station(), azimuth, 30.0, 0.7);
        let ring = &wedge.exterior().0;
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
    }
}

#[test]
fn test_wedge_rim_points_at_radius() {
    let wedge = build_wedge(&station(), 90.0, 30.0, 0.7);
    let ring = &wedge.exterior().0;
    for rim in &ring[1..3] {
        let d = haversine_distance(&station(), &to_point(rim));
        assert!((d - 700.0).abs() < 1e-3, "rim at {d}m");
    }
}

#[test]
fn test_wedge_opens_around_azimuth() {
    // Facing east: rim 1 (azimuth - 30) is north of the station, rim 2 south
    let wedge = build_wedge(&station(), 90.0, 30.0, 1.0);
    let ring = &wedge.exterior().0;
    assert!(ring[1].x > station().longitude);
    assert!(ring[2].x > station().longitude);
    assert!(ring[1].y > station().latitude);
    assert!(ring[2].y < station().latitude);
}

#[test]
fn test_comma_decimal_azimuth() {
    assert_eq!(parse_decimal("90,5"), Some(90.5));
    assert_eq!(parse_decimal("0,0"), Some(0.0));
    assert_eq!(parse_decimal("1,2,3"), None);
}
