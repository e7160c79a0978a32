//! Unified error handling for sector map generation.
//!
//! Every failure aborts the whole run: there is no row-level
//! skip-and-continue and no partial-success mode.

use thiserror::Error;

/// Errors produced while reading an inventory, building geometry or
/// writing the output artifacts.
#[derive(Debug, Error)]
pub enum SectorMapError {
    /// The input table lacks one or more required columns.
    #[error("input is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A required numeric field survived the null filter but did not parse.
    #[error("line {line}: column {column} has non-numeric value {value:?}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    /// Geometry parameters outside their valid domain.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// A configuration value outside its accepted range.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("KMZ archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SectorMapError>;

impl SectorMapError {
    pub(crate) fn invalid_geometry(reason: impl Into<String>) -> Self {
        SectorMapError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(field: &str, reason: impl Into<String>) -> Self {
        SectorMapError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Converts `Option`s into crate errors.
pub trait OptionExt<T> {
    /// Map `None` to [`SectorMapError::InvalidGeometry`].
    fn ok_or_invalid_geometry(self, reason: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_invalid_geometry(self, reason: &str) -> Result<T> {
        self.ok_or_else(|| SectorMapError::invalid_geometry(reason))
    }
}
