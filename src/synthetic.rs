//! Synthetic sector inventories for stress testing and benchmarking.
//!
//! Generates stations scattered around an origin, each with a handful of
//! sectors on realistic azimuths, operators and frequencies. Generation is
//! seeded, so the same scenario always yields the same inventory.
//!
//! Feature-gated behind `synthetic`; not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use sectormap::synthetic::SyntheticInventory;
//!
//! let scenario = SyntheticInventory::metro_area();
//! let records = scenario.generate();
//! assert!(records.len() >= scenario.station_count);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo_utils::{destination_point, EARTH_RADIUS_KM};
use crate::{GeoPoint, SectorRecord};

// ============================================================================
// Types
// ============================================================================

/// Scenario configuration for generating a synthetic inventory.
#[derive(Debug, Clone)]
pub struct SyntheticInventory {
    /// Center of the generated area.
    pub origin: GeoPoint,
    /// Number of stations to generate.
    pub station_count: usize,
    /// Stations are placed uniformly by bearing within this distance (km).
    pub spread_km: f64,
    /// Maximum sectors per station (at least one is always generated).
    pub max_sectors_per_station: usize,
    /// Fraction of sectors given a frequency outside every band (0.0-1.0).
    pub unallocated_fraction: f64,
    /// Operator names drawn per station.
    pub operators: Vec<String>,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

/// Frequencies inside known bands, paired with a plausible technology.
const ALLOCATED_CARRIERS: [(f64, &str); 8] = [
    (773.0, "LTE"),
    (881.5, "WCDMA"),
    (945.2, "GSM"),
    (1845.0, "LTE"),
    (2132.6, "WCDMA"),
    (2650.0, "LTE"),
    (3500.0, "NR"),
    (4900.0, "NR"),
];

/// São Paulo origin.
const SAO_PAULO: GeoPoint = GeoPoint {
    latitude: -23.5505,
    longitude: -46.6333,
};

// ============================================================================
// Scenario Implementation
// ============================================================================

impl SyntheticInventory {
    /// Generate the inventory rows for this scenario.
    pub fn generate(&self) -> Vec<SectorRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut records = Vec::with_capacity(self.station_count * self.max_sectors_per_station);

        for station_idx in 0..self.station_count {
            let bearing: f64 = rng.gen_range(0.0..360.0);
            // sqrt keeps station density uniform over the disc
            let distance = self.spread_km * rng.gen::<f64>().sqrt();
            let location = destination_point(&self.origin, bearing, distance, EARTH_RADIUS_KM);

            let entity = if self.operators.is_empty() {
                "OPERADORA SINTETICA".to_string()
            } else {
                self.operators[rng.gen_range(0..self.operators.len())].clone()
            };

            let (frequency_mhz, technology) = if rng.gen::<f64>() < self.unallocated_fraction {
                (rng.gen_range(5000.0..6000.0_f64).round(), "NR")
            } else {
                ALLOCATED_CARRIERS[rng.gen_range(0..ALLOCATED_CARRIERS.len())]
            };

            let sector_count = rng.gen_range(1..=self.max_sectors_per_station.max(1));
            let first_azimuth: f64 = rng.gen_range(0.0..120.0_f64).round();
            for sector_idx in 0..sector_count {
                let azimuth = (first_azimuth + 360.0 * sector_idx as f64 / sector_count as f64)
                    .rem_euclid(360.0);
                records.push(SectorRecord {
                    station_id: format!("{}", 100_000 + station_idx),
                    entity: entity.clone(),
                    latitude: location.latitude,
                    longitude: location.longitude,
                    azimuth_deg: azimuth,
                    frequency_mhz,
                    technology: technology.to_string(),
                });
            }
        }

        records
    }

    /// Render the generated inventory as CSV text with the required headers.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(
            "NumEstacao,NomeEntidade,Latitude,Longitude,Azimute,FreqTxMHz,Tecnologia\n",
        );
        for r in self.generate() {
            out.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                r.station_id,
                r.entity,
                r.latitude,
                r.longitude,
                r.azimuth_deg,
                r.frequency_mhz,
                r.technology
            ));
        }
        out
    }
}

// ============================================================================
// Predefined Scenarios
// ============================================================================

impl SyntheticInventory {
    /// 500 stations from four operators within 15 km. Baseline benchmark.
    pub fn metro_area() -> Self {
        Self {
            origin: SAO_PAULO,
            station_count: 500,
            spread_km: 15.0,
            max_sectors_per_station: 3,
            unallocated_fraction: 0.05,
            operators: vec![
                "CLARO S.A.".to_string(),
                "TELEFONICA BRASIL S.A.".to_string(),
                "TIM S A".to_string(),
                "BRISANET SERVICOS DE TELECOMUNICACOES S.A.".to_string(),
            ],
            seed: 42,
        }
    }

    /// Scale the metro scenario to `station_count` stations.
    pub fn with_station_count(station_count: usize) -> Self {
        Self {
            station_count,
            ..Self::metro_area()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
