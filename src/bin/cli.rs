//! sectormap CLI - Convert sector inventories into KMZ and GeoJSON
//!
//! Usage:
//!   sectormap-cli convert <inventory.csv|.xlsx> [--output <dir>] [--config <file.json>]
//!   sectormap-cli classify <freq_mhz>...
//!
//! `convert` writes `setores_estacoes.kmz` and `setores_estacoes.geojson`
//! into the output directory. `classify` shows how frequencies map to
//! bands, sector radii and colors.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sectormap::{
    classify,
    color::{alpha_from_opacity, frequency_color, operator_color},
    export::{convert_file, ExportOptions},
    sector::sector_radius_km,
    ColorMode, SectorConfig, SectorMapError,
};

#[derive(Parser)]
#[command(name = "sectormap-cli")]
#[command(about = "Convert cellular sector inventories into KMZ and GeoJSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an inventory table into KMZ and GeoJSON files
    Convert {
        /// Inventory file: delimited text, or a spreadsheet (.xlsx, .xls, .ods)
        input: PathBuf,

        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with a SectorConfig; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Field delimiter of delimited-text input
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Sector radius for unclassified frequencies (km)
        #[arg(long)]
        default_radius_km: Option<f64>,

        /// Sector half-width (degrees)
        #[arg(long)]
        half_width: Option<f64>,

        /// Station marker radius (meters)
        #[arg(long)]
        marker_radius_m: Option<f64>,

        /// Fill opacity, 0-100
        #[arg(long)]
        opacity: Option<f64>,

        /// Marker color policy: "operator" or "frequency"
        #[arg(long)]
        marker_color: Option<ColorMode>,

        /// KMZ output file name
        #[arg(long, default_value = sectormap::export::DEFAULT_KMZ_NAME)]
        kmz_name: String,

        /// GeoJSON output file name
        #[arg(long, default_value = sectormap::export::DEFAULT_GEOJSON_NAME)]
        geojson_name: String,
    },

    /// Show band, sector radius and colors for frequencies
    Classify {
        /// Transmit frequencies in MHz
        #[arg(required = true)]
        frequencies: Vec<f64>,

        /// Operator name used for the marker color column
        #[arg(long)]
        entity: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            delimiter,
            default_radius_km,
            half_width,
            marker_radius_m,
            opacity,
            marker_color,
            kmz_name,
            geojson_name,
        } => load_config(config.as_deref()).and_then(|mut sector_config| {
            if let Some(v) = default_radius_km {
                sector_config.default_sector_radius_km = v;
            }
            if let Some(v) = half_width {
                sector_config.sector_half_width_deg = v;
            }
            if let Some(v) = marker_radius_m {
                sector_config.marker_radius_m = v;
            }
            if let Some(v) = opacity {
                sector_config.opacity_percent = v;
            }
            if let Some(v) = marker_color {
                sector_config.marker_color_mode = v;
            }
            let options = ExportOptions {
                delimiter: delimiter_byte(delimiter)?,
                kmz_name,
                geojson_name,
            };
            run_convert(&input, output.as_deref(), &options, &sector_config)
        }),
        Commands::Classify {
            frequencies,
            entity,
        } => {
            run_classify(&frequencies, entity.as_deref());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load a SectorConfig from JSON, or the defaults.
fn load_config(path: Option<&Path>) -> Result<SectorConfig, SectorMapError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(SectorConfig::default()),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8, SectorMapError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(SectorMapError::InvalidConfig {
            field: "delimiter".to_string(),
            reason: format!("must be a single ASCII character, got {delimiter:?}"),
        })
    }
}

fn run_convert(
    input: &Path,
    output: Option<&Path>,
    options: &ExportOptions,
    config: &SectorConfig,
) -> Result<(), SectorMapError> {
    let output_dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    println!("\n{}", "=".repeat(60));
    println!("Converting inventory: {}", input.display());
    println!("{}", "=".repeat(60));

    let report = convert_file(input, &output_dir, options, config)?;

    println!("\n{}", "-".repeat(60));
    println!("RESULTS");
    println!("{}", "-".repeat(60));
    println!("  Entities:         {}", report.stats.entities);
    println!("  Frequency groups: {}", report.stats.frequency_groups);
    println!("  Stations:         {}", report.stats.stations);
    println!("  Sectors:          {}", report.stats.sectors);
    println!("  Dropped rows:     {}", report.dropped_rows);
    println!("\nKMZ created: {}", report.kmz_path.display());
    println!("GeoJSON created: {}", report.geojson_path.display());
    Ok(())
}

fn run_classify(frequencies: &[f64], entity: Option<&str>) {
    let config = SectorConfig::default();
    let alpha = alpha_from_opacity(config.opacity_percent);

    println!(
        "{:>10}  {:>8}  {:>9}  {:>8}",
        "FreqTxMHz", "Band", "Radius", "Sector"
    );
    for &freq in frequencies {
        let band = classify(freq);
        let radius = sector_radius_km(&band, &config);
        let color = frequency_color(freq).with_alpha(alpha);
        println!(
            "{:>10}  {:>8}  {:>6.2} km  {}{}",
            freq,
            band.to_string(),
            radius,
            color.to_kml_hex(),
            if band.is_allocated() { "" } else { "  (unallocated)" }
        );
    }

    if let Some(entity) = entity {
        let marker = operator_color(entity).with_alpha(alpha);
        println!("\nMarker color for {:?}: {}", entity, marker.to_kml_hex());
    }
}
