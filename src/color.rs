//! Display colors for markers and sector wedges.
//!
//! Two independent policies:
//! - frequency hue: the transmit frequency is mapped linearly onto the hue
//!   wheel between 700 and 6000 MHz (wrapping), full saturation and value;
//! - operator palette: the operator's first name token picks a fixed color.
//!
//! Either is combined with an alpha channel derived from an opacity
//! percentage.

use serde::{Deserialize, Serialize};

/// Lower end of the frequency-to-hue mapping in MHz.
pub const HUE_MIN_FREQ_MHZ: f64 = 700.0;
/// Upper end of the frequency-to-hue mapping in MHz.
pub const HUE_MAX_FREQ_MHZ: f64 = 6000.0;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }
}

/// An RGB color with an alpha channel (0 = transparent, 255 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// KML color string, `aabbggrr` in lowercase hex.
    pub fn to_kml_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.a, self.b, self.g, self.r)
    }
}

/// Policy used to color station markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Fixed palette keyed by operator name.
    #[default]
    Operator,
    /// Hue derived from the transmit frequency.
    Frequency,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Operator => "operator",
            ColorMode::Frequency => "frequency",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "operator" => Ok(ColorMode::Operator),
            "frequency" => Ok(ColorMode::Frequency),
            other => Err(format!("unknown color mode: {other}")),
        }
    }
}

/// Operator palette, keyed by the uppercased first name token.
const OPERATOR_PALETTE: [(&str, Rgb); 4] = [
    ("CLARO", Rgb::RED),
    ("TELEFONICA", Rgb::PURPLE),
    ("VIVO", Rgb::PURPLE),
    ("TIM", Rgb::BLUE),
];

/// Alpha channel for an opacity percentage: `round(pct / 100 * 255)`,
/// clamped to `[0, 255]`.
pub fn alpha_from_opacity(opacity_percent: f64) -> u8 {
    if opacity_percent.is_nan() {
        return 0;
    }
    (opacity_percent / 100.0 * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Frequency-hue color for a transmit frequency in MHz.
pub fn frequency_color(freq_mhz: f64) -> Rgb {
    let hue = ((freq_mhz - HUE_MIN_FREQ_MHZ) / (HUE_MAX_FREQ_MHZ - HUE_MIN_FREQ_MHZ)).rem_euclid(1.0);
    let (r, g, b) = hsv_to_rgb(hue, 1.0, 1.0);
    Rgb::new(channel(r), channel(g), channel(b))
}

/// Normalize an operator name to its grouping key: first whitespace token,
/// uppercased. Blank names yield an empty key.
pub fn operator_key(entity: &str) -> String {
    entity
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_uppercase()
}

/// Fixed palette color for an operator; unknown operators are white.
pub fn operator_color(entity: &str) -> Rgb {
    let key = operator_key(entity);
    OPERATOR_PALETTE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(Rgb::WHITE)
}

/// Convert HSV (all components in `[0, 1]`) to RGB components in `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

// Truncating, not rounding: 0.999 maps to 254.
fn channel(c: f64) -> u8 {
    (c * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.5), (0.5, 0.5, 0.5));
        let (r, g, b) = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && g.abs() < 1e-9 && (b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_kml_hex_is_abgr() {
        let c = Rgb::new(0x12, 0x34, 0x56).with_alpha(0x80);
        assert_eq!(c.to_kml_hex(), "80563412");
    }

    #[test]
    fn test_color_mode_from_str() {
        assert_eq!("Operator".parse::<ColorMode>(), Ok(ColorMode::Operator));
        assert_eq!("frequency".parse::<ColorMode>(), Ok(ColorMode::Frequency));
        assert!("band".parse::<ColorMode>().is_err());
    }
}
