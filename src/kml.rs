//! KML / KMZ serialization of the overlay hierarchy.
//!
//! Each placemark carries an inline style (polygon fill color and outline
//! width). Coordinates are written as `lon,lat,0`. A KMZ is a zip archive
//! holding the document as `doc.kml`.

use std::io::{Seek, Write};

use geo::Polygon;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::aggregate::{OverlayDocument, OverlayFolder, Placemark};
use crate::error::Result;

/// Entry name of the KML document inside a KMZ archive.
pub const KMZ_DOC_ENTRY: &str = "doc.kml";

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Write `document` as a KML 2.2 file.
pub fn write_kml<W: Write>(document: &OverlayDocument, writer: &mut W) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<kml xmlns="{KML_NAMESPACE}">"#)?;
    writeln!(writer, "  <Document>")?;
    writeln!(writer, "    <name>{}</name>", escape_xml(&document.name))?;
    writeln!(writer, "    <open>1</open>")?;

    for folder in &document.folders {
        write_folder(writer, folder, 2)?;
    }

    writeln!(writer, "  </Document>")?;
    writeln!(writer, "</kml>")?;
    Ok(())
}

/// Render `document` to a KML string.
pub fn to_kml_string(document: &OverlayDocument) -> Result<String> {
    let mut buf = Vec::new();
    write_kml(document, &mut buf)?;
    // Only UTF-8 literals and escaped UTF-8 input are written.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Package `document` as a KMZ archive. Returns the underlying writer.
pub fn write_kmz<W: Write + Seek>(document: &OverlayDocument, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(KMZ_DOC_ENTRY, options)?;
    write_kml(document, &mut zip)?;
    Ok(zip.finish()?)
}

fn write_folder<W: Write>(writer: &mut W, folder: &OverlayFolder, depth: usize) -> Result<()> {
    let pad = "  ".repeat(depth);
    writeln!(writer, "{pad}<Folder>")?;
    writeln!(writer, "{pad}  <name>{}</name>", escape_xml(&folder.name))?;
    if let Some(description) = &folder.description {
        writeln!(
            writer,
            "{pad}  <description>{}</description>",
            escape_xml(description)
        )?;
    }

    for placemark in &folder.placemarks {
        write_placemark(writer, placemark, depth + 1)?;
    }
    for child in &folder.folders {
        write_folder(writer, child, depth + 1)?;
    }

    writeln!(writer, "{pad}</Folder>")?;
    Ok(())
}

fn write_placemark<W: Write>(writer: &mut W, placemark: &Placemark, depth: usize) -> Result<()> {
    let pad = "  ".repeat(depth);
    writeln!(writer, "{pad}<Placemark>")?;
    writeln!(writer, "{pad}  <name>{}</name>", escape_xml(&placemark.name))?;
    writeln!(
        writer,
        "{pad}  <description>{}</description>",
        escape_xml(&placemark.description)
    )?;
    writeln!(writer, "{pad}  <Style>")?;
    writeln!(writer, "{pad}    <LineStyle>")?;
    writeln!(
        writer,
        "{pad}      <width>{}</width>",
        placemark.style.outline_width
    )?;
    writeln!(writer, "{pad}    </LineStyle>")?;
    writeln!(writer, "{pad}    <PolyStyle>")?;
    writeln!(
        writer,
        "{pad}      <color>{}</color>",
        placemark.style.fill.to_kml_hex()
    )?;
    writeln!(writer, "{pad}    </PolyStyle>")?;
    writeln!(writer, "{pad}  </Style>")?;
    writeln!(writer, "{pad}  <Polygon>")?;
    writeln!(writer, "{pad}    <outerBoundaryIs>")?;
    writeln!(writer, "{pad}      <LinearRing>")?;
    writeln!(
        writer,
        "{pad}        <coordinates>{}</coordinates>",
        ring_coordinates(&placemark.polygon)
    )?;
    writeln!(writer, "{pad}      </LinearRing>")?;
    writeln!(writer, "{pad}    </outerBoundaryIs>")?;
    writeln!(writer, "{pad}  </Polygon>")?;
    writeln!(writer, "{pad}</Placemark>")?;
    Ok(())
}

/// Exterior ring as space-separated `lon,lat,0` tuples.
pub fn ring_coordinates(polygon: &Polygon<f64>) -> String {
    polygon
        .exterior()
        .0
        .iter()
        .map(|c| format!("{},{},0", c.x, c.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
