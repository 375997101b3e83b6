//! CSV serialization of normalized catalog items.
//!
//! Fixed column layout, header row always first. The price and URL scalars
//! are extracted from their retained descriptors here, at write time;
//! an item that reached the writer without them fails the export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dmx_core::{CatalogItem, ValidationError};

use crate::error::ExportError;

/// Column names of the export, in output order.
pub const COLUMNS: [&str; 6] = ["id", "name", "price", "city", "old_price", "url"];

/// Serializes `items` as CSV into `sink`: one header row, then one row per
/// item in order.
///
/// # Errors
///
/// - [`ExportError::Validation`] when an item has no extractable price or
///   URL scalar.
/// - [`ExportError::Csv`] / [`ExportError::Io`] when the sink rejects a
///   write.
pub fn write_catalog<W: Write>(items: &[CatalogItem], sink: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(COLUMNS)?;

    for item in items {
        writer.write_record(&row(item)?)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `items` to the file at `path`, creating it or truncating any
/// existing content.
///
/// # Errors
///
/// [`ExportError::Io`] when the destination cannot be opened, plus
/// everything [`write_catalog`] can return.
pub fn write_catalog_file(items: &[CatalogItem], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_catalog(items, BufWriter::new(file))
}

/// Builds the six cells of one row. Absent `id`/`name`/`old_price` become
/// empty cells; absent price or URL scalars are errors.
fn row(item: &CatalogItem) -> Result<[String; 6], ExportError> {
    let price = item
        .price
        .as_ref()
        .and_then(|tag| tag.price)
        .ok_or_else(|| ValidationError::MissingField {
            item: item.id_label().to_owned(),
            field: "price",
        })?;

    let url = item
        .link
        .as_ref()
        .and_then(|link| link.web_url.as_deref())
        .ok_or_else(|| ValidationError::MissingField {
            item: item.id_label().to_owned(),
            field: "web_url",
        })?;

    Ok([
        item.id.clone().unwrap_or_default(),
        item.title.clone().unwrap_or_default(),
        format_price(price),
        item.available.clone(),
        item.old_price.map(format_price).unwrap_or_default(),
        url.to_owned(),
    ])
}

/// Formats a price scalar, dropping the fractional part when it is integral
/// so `{"price": 999}` round-trips as `999`.
fn format_price(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = value as i64;
        whole.to_string()
    } else {
        value.to_string()
    }
}
