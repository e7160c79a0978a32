//! Tabular sector inventory input.
//!
//! Reads a delimited text table or the first sheet of a spreadsheet, checks
//! that every required column is present, drops rows with a null in any
//! required column and parses the numeric fields. Extra columns are ignored.
//! A malformed number in a row that survived the null filter fails the whole
//! read.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};

use crate::error::{Result, SectorMapError};
use crate::sector::parse_decimal;
use crate::SectorRecord;

pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_AZIMUTH: &str = "Azimute";
pub const COL_FREQUENCY: &str = "FreqTxMHz";
pub const COL_ENTITY: &str = "NomeEntidade";
pub const COL_STATION: &str = "NumEstacao";
pub const COL_TECHNOLOGY: &str = "Tecnologia";

/// Columns every inventory must carry (exact, case-sensitive names).
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_AZIMUTH,
    COL_FREQUENCY,
    COL_ENTITY,
    COL_STATION,
    COL_TECHNOLOGY,
];

/// File extensions read as spreadsheets; anything else is delimited text.
pub const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Cell values treated as missing, in addition to blank cells.
const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parsed inventory plus bookkeeping about filtered rows.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub records: Vec<SectorRecord>,
    /// Rows removed by the null filter.
    pub dropped_rows: usize,
}

/// Read an inventory from any reader using the given field delimiter.
pub fn read_inventory<R: Read>(reader: R, delimiter: u8) -> Result<Inventory> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut inventory = Inventory::default();
    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        inventory.push(columns.extract(&row, line)?, line);
    }

    inventory.log_summary();
    Ok(inventory)
}

/// Read the first worksheet of a spreadsheet file. The first row holds the
/// headers.
pub fn read_spreadsheet_path(path: &Path) -> Result<Inventory> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(calamine::Error::Msg("workbook has no worksheets"))??;
    let first_line = range.start().map_or(1, |(row, _)| u64::from(row) + 1);

    let mut rows = range.rows();
    let headers: StringRecord = match rows.next() {
        Some(cells) => cells.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => StringRecord::new(),
    };
    let columns = ColumnIndex::resolve(&headers)?;

    let mut inventory = Inventory::default();
    for (offset, cells) in rows.enumerate() {
        let line = first_line + 1 + offset as u64;
        let row: StringRecord = cells.iter().map(cell_text).collect();
        inventory.push(columns.extract(&row, line)?, line);
    }

    inventory.log_summary();
    Ok(inventory)
}

/// Read an inventory file from disk, choosing the reader by extension.
pub fn read_inventory_path(path: &Path, delimiter: u8) -> Result<Inventory> {
    if is_spreadsheet(path) {
        return read_spreadsheet_path(path);
    }
    let file = File::open(path)?;
    read_inventory(BufReader::new(file), delimiter)
}

/// Whether `path` has one of [`SPREADSHEET_EXTENSIONS`] (case-insensitive).
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

impl Inventory {
    fn push(&mut self, record: Option<SectorRecord>, line: u64) {
        match record {
            Some(record) => self.records.push(record),
            None => {
                self.dropped_rows += 1;
                debug!(
                    "[Inventory] Dropped row at line {} with missing required value",
                    line
                );
            }
        }
    }

    fn log_summary(&self) {
        info!(
            "[Inventory] Read {} sector rows ({} dropped with nulls)",
            self.records.len(),
            self.dropped_rows
        );
    }
}

/// Text of a spreadsheet cell as it would appear in a delimited export.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Whether a raw cell counts as null.
pub fn is_null(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || NULL_MARKERS.contains(&trimmed)
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    latitude: usize,
    longitude: usize,
    azimuth: usize,
    frequency: usize,
    entity: usize,
    station: usize,
    technology: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim_start_matches('\u{feff}'), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !positions.contains_key(**col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SectorMapError::MissingColumns { missing });
        }

        Ok(Self {
            latitude: positions[COL_LATITUDE],
            longitude: positions[COL_LONGITUDE],
            azimuth: positions[COL_AZIMUTH],
            frequency: positions[COL_FREQUENCY],
            entity: positions[COL_ENTITY],
            station: positions[COL_STATION],
            technology: positions[COL_TECHNOLOGY],
        })
    }

    fn all(&self) -> [usize; 7] {
        [
            self.latitude,
            self.longitude,
            self.azimuth,
            self.frequency,
            self.entity,
            self.station,
            self.technology,
        ]
    }

    /// `Ok(None)` when any required cell is null.
    fn extract(&self, row: &StringRecord, line: u64) -> Result<Option<SectorRecord>> {
        if self
            .all()
            .iter()
            .any(|&idx| row.get(idx).map_or(true, is_null))
        {
            return Ok(None);
        }

        let text = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();

        Ok(Some(SectorRecord {
            station_id: text(self.station),
            entity: text(self.entity),
            latitude: parse_number(row, line, self.latitude, COL_LATITUDE)?,
            longitude: parse_number(row, line, self.longitude, COL_LONGITUDE)?,
            azimuth_deg: parse_number(row, line, self.azimuth, COL_AZIMUTH)?,
            frequency_mhz: parse_number(row, line, self.frequency, COL_FREQUENCY)?,
            technology: text(self.technology),
        }))
    }
}

/// Parse a numeric cell, accepting `,` as the decimal separator.
fn parse_number(row: &StringRecord, line: u64, idx: usize, column: &str) -> Result<f64> {
    let raw = row.get(idx).unwrap_or("");
    parse_decimal(raw)
        .filter(|v| v.is_finite())
        .ok_or_else(|| SectorMapError::InvalidNumber {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}
