//! CSV interchange format between the fetch and plot stages.
//!
//! The first column is an unnamed index holding each row's position in the
//! fetched sequence; the remaining columns are the flattened field names.
//! Null cells are written as empty fields and read back as null.

use std::io;
use std::path::Path;

use super::RawTable;
use crate::error::{Result, TableError};

/// Writes `table` to `path`, creating parent directories as needed.
pub fn write_csv(table: &RawTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv_to(table, file)?;
    tracing::info!("Wrote {} row(s) to {}", table.len(), path.display());
    Ok(())
}

/// Writes `table` to any writer.
pub fn write_csv_to<W: io::Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![""];
    header.extend(table.columns().iter().map(String::as_str));
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.index.to_string());
        record.extend(row.cells.iter().map(|c| c.clone().unwrap_or_default()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Reads a table previously written by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)?;
    let table = read_csv_from(file)?;
    tracing::debug!("Read {} row(s) from {}", table.len(), path.display());
    Ok(table)
}

/// Reads a table from any reader.
///
/// An empty first header is taken as the index column; without one, rows are
/// indexed by position.
pub fn read_csv_from<R: io::Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let has_index = headers.get(0).is_some_and(str::is_empty);
    let skip = usize::from(has_index);
    let columns = headers.iter().skip(skip).map(str::to_string).collect();
    let mut table = RawTable::new(columns);

    for (position, record) in rdr.records().enumerate() {
        let record = record?;
        let index = if has_index {
            let raw = record.get(0).unwrap_or_default();
            raw.trim().parse().map_err(|_| TableError::InvalidCell {
                column: "index".into(),
                row: position,
                value: raw.to_string(),
            })?
        } else {
            position
        };
        let cells = record
            .iter()
            .skip(skip)
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        table.push_row(index, cells);
    }

    Ok(table)
}
