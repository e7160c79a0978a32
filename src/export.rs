//! File-level conversion: inventory file in, KMZ and GeoJSON files out.
//!
//! The input is read and all geometry is built before any file is created,
//! so input and configuration errors never leave output behind. The two
//! artifacts are then written one after the other (KMZ first); they are not
//! written transactionally.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::aggregate::{build_sector_map, MapStats, SectorMap};
use crate::error::Result;
use crate::inventory::read_inventory_path;
use crate::{geojson, kml, SectorConfig};

/// Default KMZ file name.
pub const DEFAULT_KMZ_NAME: &str = "setores_estacoes.kmz";
/// Default GeoJSON file name.
pub const DEFAULT_GEOJSON_NAME: &str = "setores_estacoes.geojson";

/// Input parsing and output naming options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field delimiter of the input table.
    pub delimiter: u8,
    pub kmz_name: String,
    pub geojson_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            kmz_name: DEFAULT_KMZ_NAME.to_string(),
            geojson_name: DEFAULT_GEOJSON_NAME.to_string(),
        }
    }
}

/// Paths and counts of a finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub kmz_path: PathBuf,
    pub geojson_path: PathBuf,
    pub stats: MapStats,
    /// Input rows removed by the null filter.
    pub dropped_rows: usize,
}

/// Convert the inventory at `input` into KMZ and GeoJSON files inside
/// `output_dir` (created if missing).
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    options: &ExportOptions,
    config: &SectorConfig,
) -> Result<ExportReport> {
    info!("[Export] Reading inventory: {}", input.display());
    let inventory = read_inventory_path(input, options.delimiter)?;
    let map = build_sector_map(&inventory.records, config)?;

    fs::create_dir_all(output_dir)?;
    let kmz_path = output_dir.join(&options.kmz_name);
    let geojson_path = output_dir.join(&options.geojson_name);
    write_outputs(&map, &kmz_path, &geojson_path)?;

    Ok(ExportReport {
        kmz_path,
        geojson_path,
        stats: map.stats,
        dropped_rows: inventory.dropped_rows,
    })
}

/// Write both artifacts of `map`, KMZ first.
pub fn write_outputs(map: &SectorMap, kmz_path: &Path, geojson_path: &Path) -> Result<()> {
    let kmz_file = BufWriter::new(File::create(kmz_path)?);
    kml::write_kmz(&map.document, kmz_file)?.flush()?;
    info!("[Export] Written: {}", kmz_path.display());

    let mut geojson_file = BufWriter::new(File::create(geojson_path)?);
    geojson::write_geojson(&map.features, &mut geojson_file)?;
    geojson_file.flush()?;
    info!(
        "[Export] Written: {} ({} features)",
        geojson_path.display(),
        map.features.len()
    );

    Ok(())
}
