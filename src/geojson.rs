//! GeoJSON serialization of the flat feature list.
//!
//! Writes a `FeatureCollection` in geographic lon/lat coordinates, labelled
//! with the CRS84 reference system (no reprojection happens anywhere, so no
//! projected CRS is ever claimed). Styling is overlay-only and not written.

use std::io::Write;

use geo::Polygon;
use serde::Serialize;

use crate::aggregate::{FeatureGeometry, FeatureProperties, OutputFeature, DOCUMENT_NAME};
use crate::error::Result;
use crate::geo_utils::compute_bounds;
use crate::GeoPoint;

/// OGC URN for WGS84 longitude/latitude axis order.
pub const CRS84_URN: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

#[derive(Serialize)]
struct FeatureCollectionOut<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    crs: CrsOut,
    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<[f64; 4]>,
    features: Vec<FeatureOut<'a>>,
}

#[derive(Serialize)]
struct CrsOut {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: CrsProperties,
}

#[derive(Serialize)]
struct CrsProperties {
    name: &'static str,
}

#[derive(Serialize)]
struct FeatureOut<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: GeometryOut,
    properties: &'a FeatureProperties,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum GeometryOut {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl GeometryOut {
    fn from_feature(geometry: &FeatureGeometry) -> Self {
        match geometry {
            FeatureGeometry::Point(p) => GeometryOut::Point {
                coordinates: [p.longitude, p.latitude],
            },
            FeatureGeometry::Polygon(polygon) => GeometryOut::Polygon {
                coordinates: polygon_rings(polygon),
            },
        }
    }
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.0.iter().map(|c| [c.x, c.y]).collect())
        .collect()
}

/// `[min_lon, min_lat, max_lon, max_lat]` over every coordinate, or `None`
/// for an empty collection.
pub fn feature_bbox(features: &[OutputFeature]) -> Option<[f64; 4]> {
    let points: Vec<GeoPoint> = features
        .iter()
        .flat_map(|f| match &f.geometry {
            FeatureGeometry::Point(p) => vec![*p],
            FeatureGeometry::Polygon(polygon) => polygon
                .exterior()
                .0
                .iter()
                .map(|c| GeoPoint::new(c.y, c.x))
                .collect(),
        })
        .collect();

    if points.is_empty() {
        return None;
    }
    let b = compute_bounds(&points);
    Some([b.min_lng, b.min_lat, b.max_lng, b.max_lat])
}

/// Write `features` as a GeoJSON FeatureCollection.
pub fn write_geojson<W: Write>(features: &[OutputFeature], writer: W) -> Result<()> {
    let collection = FeatureCollectionOut {
        kind: "FeatureCollection",
        name: DOCUMENT_NAME,
        crs: CrsOut {
            kind: "name",
            properties: CrsProperties { name: CRS84_URN },
        },
        bbox: feature_bbox(features),
        features: features
            .iter()
            .map(|f| FeatureOut {
                kind: "Feature",
                geometry: GeometryOut::from_feature(&f.geometry),
                properties: &f.properties,
            })
            .collect(),
    };
    serde_json::to_writer_pretty(writer, &collection)?;
    Ok(())
}

/// Render `features` to a GeoJSON string.
pub fn to_geojson_string(features: &[OutputFeature]) -> Result<String> {
    let mut buf = Vec::new();
    write_geojson(features, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
