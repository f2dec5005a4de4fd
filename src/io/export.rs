//! CSV export for bill-of-materials lines.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::budget::bom::BomLine;

/// Column header for CSV BOM export.
const HEADER: &str = "item,quantity";

/// Exports BOM lines to a CSV file at the given path.
///
/// Writes a header row followed by one row per line in BOM order.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(lines: &[BomLine], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(lines, buf)
}

/// Writes BOM lines as CSV to any writer.
///
/// Count quantities render as bare integers, the fiber length as its
/// formatted kilometer string.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(lines: &[BomLine], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for line in lines {
        wtr.write_record(&[line.name.clone(), line.quantity.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
