//! Tests for feature aggregation

use sectormap::color::{frequency_color, Rgb};
use sectormap::geo_utils::haversine_distance;
use sectormap::{
    build_sector_map, ColorMode, FeatureGeometry, FeatureKind, GeoPoint, SectorConfig,
    SectorMapError, SectorRecord,
};

fn record(entity: &str, station: &str, azimuth: f64, freq: f64, tech: &str) -> SectorRecord {
    SectorRecord {
        station_id: station.to_string(),
        entity: entity.to_string(),
        latitude: -23.5,
        longitude: -46.6,
        azimuth_deg: azimuth,
        frequency_mhz: freq,
        technology: tech.to_string(),
    }
}

fn claro_single() -> Vec<SectorRecord> {
    vec![record("Claro Brasil", "1", 90.0, 2650.0, "LTE")]
}

#[test]
fn test_single_row_scenario() {
    let map = build_sector_map(&claro_single(), &SectorConfig::default()).unwrap();

    // entity -> frequency -> station
    assert_eq!(map.document.folders.len(), 1);
    let entity = &map.document.folders[0];
    assert_eq!(entity.name, "CLARO");
    assert_eq!(entity.folders.len(), 1);
    let freq = &entity.folders[0];
    assert_eq!(freq.name, "Frequência 2600 MHz (2650 MHz)");
    assert_eq!(freq.folders.len(), 1);
    let station = &freq.folders[0];
    assert_eq!(station.name, "Estação 1");

    // one marker + one wedge
    assert_eq!(station.placemarks.len(), 2);
    let marker = &station.placemarks[0];
    assert_eq!(marker.name, "Estação 1");
    assert_eq!(marker.style.outline_width, 0.0);
    assert_eq!(marker.style.fill, Rgb::RED.with_alpha(128));

    let sector = &station.placemarks[1];
    assert_eq!(sector.name, "Setor 90° - 2650 MHz - LTE - Claro Brasil");
    assert_eq!(sector.polygon.exterior().0.len(), 4);
    assert_eq!(sector.style.fill, frequency_color(2650.0).with_alpha(128));

    // 2650 MHz -> 2600 band -> 0.7 km
    let rim = sector.polygon.exterior().0[1];
    let d = haversine_distance(&GeoPoint::new(-23.5, -46.6), &GeoPoint::new(rim.y, rim.x));
    assert!((d - 700.0).abs() < 1e-3);

    assert_eq!(map.stats.entities, 1);
    assert_eq!(map.stats.stations, 1);
    assert_eq!(map.stats.sectors, 1);
}

#[test]
fn test_single_row_features() {
    let map = build_sector_map(&claro_single(), &SectorConfig::default()).unwrap();
    assert_eq!(map.features.len(), 2);

    let point = &map.features[0];
    assert_eq!(point.properties.kind, FeatureKind::Station);
    assert_eq!(point.properties.entity, "Claro Brasil");
    assert_eq!(point.properties.station_id, "1");
    assert_eq!(point.properties.frequency_mhz, 2650.0);
    assert_eq!(point.properties.azimuth_deg, None);
    assert_eq!(point.geometry, FeatureGeometry::Point(GeoPoint::new(-23.5, -46.6)));

    let sector = &map.features[1];
    assert_eq!(sector.properties.kind, FeatureKind::Sector);
    assert_eq!(sector.properties.azimuth_deg, Some(90.0));
    assert_eq!(sector.properties.technology.as_deref(), Some("LTE"));
    // Raw frequency in attributes, not the band label
    assert_eq!(sector.properties.frequency_mhz, 2650.0);
}

#[test]
fn test_overlay_and_features_share_geometry() {
    let map = build_sector_map(&claro_single(), &SectorConfig::default()).unwrap();
    let overlay_wedge = &map.document.folders[0].folders[0].folders[0].placemarks[1].polygon;
    match &map.features[1].geometry {
        FeatureGeometry::Polygon(p) => assert_eq!(p, overlay_wedge),
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn test_unallocated_frequency_uses_default_radius() {
    let config = SectorConfig {
        default_sector_radius_km: 0.5,
        ..SectorConfig::default()
    };
    let records = vec![record("TIM S A", "9", 0.0, 10000.0, "NR")];
    let map = build_sector_map(&records, &config).unwrap();

    let freq_folder = &map.document.folders[0].folders[0];
    assert_eq!(freq_folder.name, "Frequência 10000 MHz");

    let wedge = &freq_folder.folders[0].placemarks[1].polygon;
    let rim = wedge.exterior().0[2];
    let d = haversine_distance(&GeoPoint::new(-23.5, -46.6), &GeoPoint::new(rim.y, rim.x));
    assert!((d - 500.0).abs() < 1e-3);
}

#[test]
fn test_grouping_hierarchy() {
    let mut records = vec![
        record("TIM S A", "20", 0.0, 773.0, "LTE"),
        record("Claro Brasil", "10", 0.0, 2650.0, "LTE"),
        record("TIM S A", "21", 120.0, 773.0, "LTE"),
        record("TIM S A", "20", 120.0, 773.0, "LTE"),
        record("TIM S A", "20", 240.0, 3500.0, "NR"),
        record("CLARO S.A.", "11", 0.0, 2650.0, "LTE"),
    ];
    // Second row of station 20 sits elsewhere; only the first location counts
    records[3].latitude = -10.0;

    let map = build_sector_map(&records, &SectorConfig::default()).unwrap();

    // Entities sorted by normalized key; both Claro spellings merge
    let names: Vec<&str> = map.document.folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["CLARO", "TIM"]);
    assert_eq!(map.document.folders[0].folders[0].folders.len(), 2);

    let tim = &map.document.folders[1];
    assert_eq!(tim.folders.len(), 2);
    assert_eq!(tim.folders[0].name, "Frequência 700 MHz (773 MHz)");
    assert_eq!(tim.folders[1].name, "Frequência 3500 MHz");

    // 773 MHz: stations in first-appearance order
    let stations: Vec<&str> = tim.folders[0].folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(stations, vec!["Estação 20", "Estação 21"]);
    assert_eq!(tim.folders[0].folders[0].placemarks.len(), 3);

    // Both wedges of station 20 start at the first row's coordinate
    for placemark in &tim.folders[0].folders[0].placemarks[1..] {
        let origin = placemark.polygon.exterior().0[0];
        assert_eq!(origin.y, -23.5);
        assert_eq!(origin.x, -46.6);
    }

    // Band and station folders summarize their contents; operator folders don't
    assert_eq!(tim.description, None);
    assert_eq!(
        tim.folders[0].description.as_deref(),
        Some("Faixa: 700 MHz, Estações: 2")
    );
    assert_eq!(
        tim.folders[0].folders[0].description.as_deref(),
        Some("Setores: 2")
    );

    assert_eq!(map.stats.entities, 2);
    assert_eq!(map.stats.frequency_groups, 3);
    assert_eq!(map.stats.stations, 5);
    assert_eq!(map.stats.sectors, 6);
    assert_eq!(map.features.len(), 11);
    assert_eq!(map.document.folders.iter().map(|f| f.placemark_count()).sum::<usize>(), 11);
}

#[test]
fn test_frequency_marker_color_mode() {
    let config = SectorConfig {
        marker_color_mode: ColorMode::Frequency,
        opacity_percent: 100.0,
        ..SectorConfig::default()
    };
    let map = build_sector_map(&claro_single(), &config).unwrap();
    let marker = &map.document.folders[0].folders[0].folders[0].placemarks[0];
    assert_eq!(marker.style.fill, frequency_color(2650.0).with_alpha(255));
}

#[test]
fn test_unknown_operator_marker_is_white() {
    let records = vec![record("Brisanet Servicos", "5", 0.0, 3500.0, "NR")];
    let map = build_sector_map(&records, &SectorConfig::default()).unwrap();
    let marker = &map.document.folders[0].folders[0].folders[0].placemarks[0];
    assert_eq!(marker.style.fill, Rgb::WHITE.with_alpha(128));
}

#[test]
fn test_marker_circle_closed_with_configured_points() {
    let config = SectorConfig {
        marker_points: 12,
        marker_radius_m: 35.0,
        ..SectorConfig::default()
    };
    let map = build_sector_map(&claro_single(), &config).unwrap();
    let circle = &map.document.folders[0].folders[0].folders[0].placemarks[0].polygon;
    assert_eq!(circle.exterior().0.len(), 13);
    for c in &circle.exterior().0 {
        let d = haversine_distance(&GeoPoint::new(-23.5, -46.6), &GeoPoint::new(c.y, c.x));
        assert!((d - 35.0).abs() < 1e-6);
    }
}

#[test]
fn test_empty_input_yields_empty_map() {
    let map = build_sector_map(&[], &SectorConfig::default()).unwrap();
    assert!(map.is_empty());
    assert!(map.document.folders.is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let config = SectorConfig {
        opacity_percent: 120.0,
        ..SectorConfig::default()
    };
    assert!(matches!(
        build_sector_map(&claro_single(), &config),
        Err(SectorMapError::InvalidConfig { .. })
    ));
}

#[test]
fn test_deterministic() {
    let records = vec![
        record("TIM S A", "20", 15.5, 763.0, "LTE"),
        record("Claro Brasil", "10", 200.0, 2650.0, "LTE"),
        record("TELEFONICA BRASIL S.A.", "30", 330.0, 1845.0, "LTE"),
    ];
    let a = build_sector_map(&records, &SectorConfig::default()).unwrap();
    let b = build_sector_map(&records, &SectorConfig::default()).unwrap();
    assert_eq!(a, b);
}
