//! Frequency band classification and band-keyed sector radii.
//!
//! The range table encodes spectrum-allocation knowledge: lower bounds are
//! inclusive, upper bounds exclusive. Frequencies outside every range pass
//! through unchanged as [`Band::Unallocated`].

use std::fmt;

/// Canonical operating band of a transmit frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Mhz450,
    Mhz700,
    Mhz850,
    Mhz900,
    Mhz1800,
    Mhz2100,
    Mhz2300,
    Mhz2500,
    Mhz2600,
    Mhz3500,
    Mhz4900,
    /// No range matched; carries the raw frequency in MHz.
    Unallocated(f64),
}

/// `(lower inclusive, upper exclusive, band)` in MHz.
const BAND_RANGES: [(f64, f64, Band); 11] = [
    (450.0, 480.0, Band::Mhz450),
    (764.0, 803.0, Band::Mhz700),
    (864.0, 895.0, Band::Mhz850),
    (943.0, 960.0, Band::Mhz900),
    (1800.0, 1880.0, Band::Mhz1800),
    (2100.0, 2170.0, Band::Mhz2100),
    (2300.0, 2400.0, Band::Mhz2300),
    (2570.0, 2620.0, Band::Mhz2500),
    (2620.0, 2690.0, Band::Mhz2600),
    (3300.0, 3700.0, Band::Mhz3500),
    (4830.0, 4950.0, Band::Mhz4900),
];

/// Classify a transmit frequency (MHz) into its band.
///
/// Total: every input maps to exactly one band or to itself.
///
/// # Example
/// ```
/// use sectormap::band::{classify, Band};
/// assert_eq!(classify(2650.0), Band::Mhz2600);
/// assert_eq!(classify(480.0), Band::Unallocated(480.0));
/// ```
pub fn classify(freq_mhz: f64) -> Band {
    BAND_RANGES
        .iter()
        .find(|(lower, upper, _)| freq_mhz >= *lower && freq_mhz < *upper)
        .map(|(_, _, band)| *band)
        .unwrap_or(Band::Unallocated(freq_mhz))
}

impl Band {
    /// Band label in MHz, or the raw frequency for unallocated values.
    pub fn label_mhz(&self) -> f64 {
        match self {
            Band::Mhz450 => 450.0,
            Band::Mhz700 => 700.0,
            Band::Mhz850 => 850.0,
            Band::Mhz900 => 900.0,
            Band::Mhz1800 => 1800.0,
            Band::Mhz2100 => 2100.0,
            Band::Mhz2300 => 2300.0,
            Band::Mhz2500 => 2500.0,
            Band::Mhz2600 => 2600.0,
            Band::Mhz3500 => 3500.0,
            Band::Mhz4900 => 4900.0,
            Band::Unallocated(freq) => *freq,
        }
    }

    /// Sector radius for this band in kilometres.
    /// Unallocated frequencies fall back to `default_km`.
    pub fn sector_radius_km(&self, default_km: f64) -> f64 {
        match self {
            Band::Mhz450 => 1.5,
            Band::Mhz700 => 1.4,
            Band::Mhz850 => 1.3,
            Band::Mhz900 => 1.2,
            Band::Mhz1800 => 1.1,
            Band::Mhz2100 => 1.0,
            Band::Mhz2300 => 0.9,
            Band::Mhz2500 => 0.8,
            Band::Mhz2600 => 0.7,
            Band::Mhz3500 => 0.6,
            Band::Mhz4900 => 0.5,
            Band::Unallocated(_) => default_km,
        }
    }

    pub fn is_allocated(&self) -> bool {
        !matches!(self, Band::Unallocated(_))
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label_mhz())
    }
}
