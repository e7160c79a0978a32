//! # Sector Map
//!
//! Converts a cellular base-station inventory (one row per antenna sector)
//! into map overlays.
//!
//! This library provides:
//! - Great-circle point projection on a spherical Earth
//! - Band classification of transmit frequencies and band-keyed sector radii
//! - Sector wedge and station marker geometry
//! - Frequency-hue and operator-palette coloring
//! - Aggregation into an entity → band → station folder hierarchy plus a
//!   flat feature list
//! - KMZ and GeoJSON serialization
//!
//! ## Features
//!
//! - **`cli`** - Build the `sectormap-cli` binary (default)
//! - **`synthetic`** - Synthetic inventory generator for benchmarks
//!
//! ## Quick Start
//!
//! ```rust
//! use sectormap::{build_sector_map, SectorConfig, SectorRecord};
//!
//! let records = vec![SectorRecord {
//!     station_id: "1".to_string(),
//!     entity: "Claro Brasil".to_string(),
//!     latitude: -23.5,
//!     longitude: -46.6,
//!     azimuth_deg: 90.0,
//!     frequency_mhz: 2650.0,
//!     technology: "LTE".to_string(),
//! }];
//!
//! let map = build_sector_map(&records, &SectorConfig::default()).unwrap();
//! assert_eq!(map.features.len(), 2); // station point + one sector
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, SectorMapError};

// Spherical-Earth geodesy (projection, distance, bounds)
pub mod geo_utils;

// Station marker circles
pub mod circle;
pub use circle::generate_circle;

// Frequency band classification
pub mod band;
pub use band::{classify, Band};

// Sector wedge geometry
pub mod sector;
pub use sector::build_wedge;

// Marker and wedge colors
pub mod color;
pub use color::{ColorMode, Rgb, Rgba};

// Tabular input
pub mod inventory;
pub use inventory::{read_inventory, read_inventory_path, Inventory, REQUIRED_COLUMNS};

// Grouping rows into the folder hierarchy and feature list
pub mod aggregate;
pub use aggregate::{
    build_sector_map, FeatureGeometry, FeatureKind, FeatureProperties, MapStats, OutputFeature,
    OverlayDocument, OverlayFolder, Placemark, PolygonStyle, SectorMap,
};

// Output serializers
pub mod geojson;
pub mod kml;

// File-level conversion used by front ends
pub mod export;
pub use export::{convert_file, ExportOptions, ExportReport};

// Synthetic inventories for benchmarks and stress tests
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate in degrees.
///
/// # Example
/// ```
/// use sectormap::GeoPoint;
/// let point = GeoPoint::new(-23.5505, -46.6333); // São Paulo
/// assert_eq!(point.longitude, -46.6333);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }
}

/// One inventory row: a single antenna sector of a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    /// Station identifier (`NumEstacao`)
    pub station_id: String,
    /// Licensed operator name as written in the inventory (`NomeEntidade`)
    pub entity: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Antenna bearing, degrees clockwise from north (`Azimute`)
    pub azimuth_deg: f64,
    /// Transmit frequency in MHz (`FreqTxMHz`)
    pub frequency_mhz: f64,
    /// Free-text technology code, e.g. NR, LTE, WCDMA, GSM (`Tecnologia`)
    pub technology: String,
}

impl SectorRecord {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Configuration for sector map generation.
///
/// Passed explicitly into the pipeline; there is no global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorConfig {
    /// Sector radius for frequencies outside every known band.
    /// Default: 0.5 km
    pub default_sector_radius_km: f64,

    /// Angular half-width of each sector wedge.
    /// Default: 30 degrees (a 60 degree wedge)
    pub sector_half_width_deg: f64,

    /// Radius of the station marker circle.
    /// Default: 20 meters
    pub marker_radius_m: f64,

    /// Number of sampled bearings on the marker circle.
    /// Default: 36
    pub marker_points: u32,

    /// Fill opacity of markers and wedges, 0 (transparent) to 100 (opaque).
    /// Default: 50
    pub opacity_percent: f64,

    /// Marker fill policy. Sector wedges always use the frequency hue.
    /// Default: operator palette
    pub marker_color_mode: ColorMode,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            default_sector_radius_km: 0.5,
            sector_half_width_deg: 30.0,
            marker_radius_m: 20.0,
            marker_points: circle::DEFAULT_CIRCLE_POINTS,
            opacity_percent: 50.0,
            marker_color_mode: ColorMode::Operator,
        }
    }
}

impl SectorConfig {
    /// Reject values outside their accepted ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.default_sector_radius_km.is_finite() || self.default_sector_radius_km <= 0.0 {
            return Err(SectorMapError::invalid_config(
                "default_sector_radius_km",
                format!("must be positive, got {}", self.default_sector_radius_km),
            ));
        }
        if !(self.sector_half_width_deg > 0.0 && self.sector_half_width_deg <= 180.0) {
            return Err(SectorMapError::invalid_config(
                "sector_half_width_deg",
                format!("must be in (0, 180], got {}", self.sector_half_width_deg),
            ));
        }
        if !self.marker_radius_m.is_finite() || self.marker_radius_m <= 0.0 {
            return Err(SectorMapError::invalid_config(
                "marker_radius_m",
                format!("must be positive, got {}", self.marker_radius_m),
            ));
        }
        if self.marker_points < 3 {
            return Err(SectorMapError::invalid_config(
                "marker_points",
                format!("must be at least 3, got {}", self.marker_points),
            ));
        }
        if !(0.0..=100.0).contains(&self.opacity_percent) {
            return Err(SectorMapError::invalid_config(
                "opacity_percent",
                format!("must be in [0, 100], got {}", self.opacity_percent),
            ));
        }
        Ok(())
    }

    /// Alpha channel shared by every fill.
    pub fn alpha(&self) -> u8 {
        color::alpha_from_opacity(self.opacity_percent)
    }
}
