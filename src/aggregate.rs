//! Feature aggregation.
//!
//! Groups sector rows by operator, transmit frequency and station, then
//! builds one marker circle and station point per station and one wedge per
//! sector row. The result carries two views of the same geometry:
//!
//! - an overlay hierarchy (operator → band → station folders, styled
//!   placemarks) for KMZ output;
//! - a flat feature list (geometry + attributes, no styling) for GeoJSON.
//!
//! ## Ordering
//! Operators are sorted by key, frequencies ascending, stations in order of
//! first appearance, sectors in input order. Identical input and
//! configuration always produce identical output.

use std::collections::{BTreeMap, HashMap};

use geo::Polygon;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize, Serializer};

use crate::band::{classify, Band};
use crate::circle::generate_circle;
use crate::color::{frequency_color, operator_color, operator_key, ColorMode, Rgba};
use crate::error::{OptionExt, Result};
use crate::sector::{build_wedge, sector_radius_km};
use crate::{GeoPoint, SectorConfig, SectorRecord};

/// Name of the top-level overlay document.
pub const DOCUMENT_NAME: &str = "Setores de Estações";

/// Outline width of sector wedges; markers have no outline.
const SECTOR_OUTLINE_WIDTH: f64 = 1.0;

// ============================================================================
// Output Types
// ============================================================================

/// Everything produced for one inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorMap {
    pub document: OverlayDocument,
    pub features: Vec<OutputFeature>,
    pub stats: MapStats,
}

/// Counts gathered while aggregating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MapStats {
    pub entities: usize,
    pub frequency_groups: usize,
    pub stations: usize,
    pub sectors: usize,
}

/// Root of the overlay hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDocument {
    pub name: String,
    pub folders: Vec<OverlayFolder>,
}

/// A named folder holding subfolders and placemarks. Operator folders carry
/// no description; band and station folders summarize their contents.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFolder {
    pub name: String,
    pub description: Option<String>,
    pub folders: Vec<OverlayFolder>,
    pub placemarks: Vec<Placemark>,
}

impl OverlayFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            folders: Vec::new(),
            placemarks: Vec::new(),
        }
    }

    /// Count placemarks in this folder and all subfolders.
    pub fn placemark_count(&self) -> usize {
        self.placemarks.len()
            + self
                .folders
                .iter()
                .map(OverlayFolder::placemark_count)
                .sum::<usize>()
    }
}

/// A styled polygon in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    pub name: String,
    pub description: String,
    pub polygon: Polygon<f64>,
    pub style: PolygonStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub fill: Rgba,
    /// Outline width in pixels; 0 hides the outline.
    pub outline_width: f64,
}

/// Geometry of a flat output feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point(GeoPoint),
    Polygon(Polygon<f64>),
}

/// Feature type tag written to the `Tipo` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    #[serde(rename = "Estação Base")]
    Station,
    #[serde(rename = "Setor")]
    Sector,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Station => "Estação Base",
            FeatureKind::Sector => "Setor",
        }
    }
}

/// Attributes of a flat output feature. The frequency is the raw inventory
/// value; band labels only appear in overlay names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    #[serde(rename = "NomeEntidade")]
    pub entity: String,
    /// Written as a JSON number when the id is an integer.
    #[serde(rename = "NumEstacao", serialize_with = "serialize_station_id")]
    pub station_id: String,
    #[serde(rename = "Azimute", skip_serializing_if = "Option::is_none")]
    pub azimuth_deg: Option<f64>,
    #[serde(rename = "FreqTxMHz")]
    pub frequency_mhz: f64,
    #[serde(rename = "Tecnologia", skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(rename = "Tipo")]
    pub kind: FeatureKind,
}

fn serialize_station_id<S: Serializer>(
    station_id: &str,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match station_id.parse::<i64>() {
        Ok(number) => serializer.serialize_i64(number),
        Err(_) => serializer.serialize_str(station_id),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputFeature {
    pub geometry: FeatureGeometry,
    pub properties: FeatureProperties,
}

// ============================================================================
// Aggregation
// ============================================================================

/// Build the overlay hierarchy and flat feature list for `records`.
///
/// Records are expected to have passed the inventory null filter. Fails on
/// an invalid configuration; an empty inventory yields an empty map.
pub fn build_sector_map(records: &[SectorRecord], config: &SectorConfig) -> Result<SectorMap> {
    config.validate()?;
    let alpha = config.alpha();

    let mut document = OverlayDocument {
        name: DOCUMENT_NAME.to_string(),
        folders: Vec::new(),
    };
    let mut features = Vec::new();
    let mut stats = MapStats::default();

    if records.is_empty() {
        warn!("[Aggregate] No sector rows to process");
        return Ok(SectorMap {
            document,
            features,
            stats,
        });
    }

    let mut by_entity: BTreeMap<String, Vec<&SectorRecord>> = BTreeMap::new();
    for record in records {
        by_entity
            .entry(operator_key(&record.entity))
            .or_default()
            .push(record);
    }

    for (entity_key, entity_rows) in &by_entity {
        let mut entity_folder = OverlayFolder::new(entity_key.clone());

        for (frequency, freq_rows) in group_by_frequency(entity_rows) {
            let band = classify(frequency);
            let mut freq_folder = OverlayFolder::new(frequency_folder_name(frequency, &band));

            for (station_id, station_rows) in group_by_station(&freq_rows) {
                let station_folder = build_station(
                    station_id,
                    &station_rows,
                    frequency,
                    config,
                    alpha,
                    &mut features,
                )?;
                stats.stations += 1;
                stats.sectors += station_rows.len();
                freq_folder.folders.push(station_folder);
            }

            freq_folder.description = Some(format!(
                "Faixa: {band} MHz, Estações: {}",
                freq_folder.folders.len()
            ));
            stats.frequency_groups += 1;
            entity_folder.folders.push(freq_folder);
        }

        stats.entities += 1;
        document.folders.push(entity_folder);
    }

    info!(
        "[Aggregate] {} entities, {} frequency groups, {} stations, {} sectors",
        stats.entities, stats.frequency_groups, stats.stations, stats.sectors
    );

    Ok(SectorMap {
        document,
        features,
        stats,
    })
}

/// Emit the marker, station point and sector wedges of one station.
fn build_station(
    station_id: &str,
    rows: &[&SectorRecord],
    frequency: f64,
    config: &SectorConfig,
    alpha: u8,
    features: &mut Vec<OutputFeature>,
) -> Result<OverlayFolder> {
    let first = rows
        .first()
        .ok_or_invalid_geometry("station group without rows")?;
    let location = first.location();

    debug!(
        "[Aggregate] Station {} ({}) at [{:.6}, {:.6}] with {} sectors",
        station_id,
        first.entity,
        location.latitude,
        location.longitude,
        rows.len()
    );

    let mut folder = OverlayFolder::new(format!("Estação {station_id}"));
    folder.description = Some(format!("Setores: {}", rows.len()));

    let marker_rgb = match config.marker_color_mode {
        ColorMode::Operator => operator_color(&first.entity),
        ColorMode::Frequency => frequency_color(frequency),
    };
    folder.placemarks.push(Placemark {
        name: format!("Estação {station_id}"),
        description: format!("Marcador da Estação Base: {}", first.entity),
        polygon: generate_circle(&location, config.marker_radius_m, config.marker_points)?,
        style: PolygonStyle {
            fill: marker_rgb.with_alpha(alpha),
            outline_width: 0.0,
        },
    });

    features.push(OutputFeature {
        geometry: FeatureGeometry::Point(location),
        properties: FeatureProperties {
            entity: first.entity.clone(),
            station_id: station_id.to_string(),
            azimuth_deg: None,
            frequency_mhz: frequency,
            technology: None,
            kind: FeatureKind::Station,
        },
    });

    for row in rows {
        let band = classify(row.frequency_mhz);
        let radius_km = sector_radius_km(&band, config);
        let wedge = build_wedge(
            &location,
            row.azimuth_deg,
            config.sector_half_width_deg,
            radius_km,
        );

        folder.placemarks.push(Placemark {
            name: format!(
                "Setor {}° - {} MHz - {} - {}",
                row.azimuth_deg, row.frequency_mhz, row.technology, row.entity
            ),
            description: format!(
                "Entidade: {}, Estação: {}, Frequência: {} MHz, Faixa: {} MHz, Tecnologia: {}",
                row.entity, station_id, row.frequency_mhz, band, row.technology
            ),
            polygon: wedge.clone(),
            style: PolygonStyle {
                fill: frequency_color(row.frequency_mhz).with_alpha(alpha),
                outline_width: SECTOR_OUTLINE_WIDTH,
            },
        });

        features.push(OutputFeature {
            geometry: FeatureGeometry::Polygon(wedge),
            properties: FeatureProperties {
                entity: row.entity.clone(),
                station_id: station_id.to_string(),
                azimuth_deg: Some(row.azimuth_deg),
                frequency_mhz: row.frequency_mhz,
                technology: Some(row.technology.clone()),
                kind: FeatureKind::Sector,
            },
        });
    }

    Ok(folder)
}

/// Folder label for a frequency group: the band, plus the raw frequency
/// when it differs from the band label.
pub fn frequency_folder_name(frequency: f64, band: &Band) -> String {
    if band.label_mhz() == frequency {
        format!("Frequência {band} MHz")
    } else {
        format!("Frequência {band} MHz ({frequency} MHz)")
    }
}

/// Group rows by exact frequency, ascending. Row order within a group is
/// preserved.
fn group_by_frequency<'a>(rows: &[&'a SectorRecord]) -> Vec<(f64, Vec<&'a SectorRecord>)> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| a.frequency_mhz.total_cmp(&b.frequency_mhz));

    let mut groups: Vec<(f64, Vec<&'a SectorRecord>)> = Vec::new();
    for row in sorted {
        if let Some((freq, members)) = groups.last_mut() {
            if *freq == row.frequency_mhz {
                members.push(row);
                continue;
            }
        }
        groups.push((row.frequency_mhz, vec![row]));
    }
    groups
}

/// Group rows by station id in order of first appearance.
fn group_by_station<'a>(rows: &[&'a SectorRecord]) -> Vec<(&'a str, Vec<&'a SectorRecord>)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Vec<&'a SectorRecord>)> = Vec::new();

    for &row in rows {
        let id = row.station_id.as_str();
        match index.get(id) {
            Some(&i) => groups[i].1.push(row),
            None => {
                index.insert(id, groups.len());
                groups.push((id, vec![row]));
            }
        }
    }
    groups
}

impl SectorMap {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
