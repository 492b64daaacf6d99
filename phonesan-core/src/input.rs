// phonesan-core/src/input.rs
//! Parsing uploaded files into a [`RecordTable`].
//!
//! Two formats are accepted, chosen by file extension:
//!
//! * `.csv`: delimited text whose first row is the header. The delimiter is
//!   `;` when the header line holds a `;` and no `,`, and `,` otherwise.
//! * `.xlsx`: the first worksheet of a workbook, first row as header. The grid
//!   always starts at `A1` and spans the sheet's declared dimension, so blank
//!   leading or trailing cells survive.
//!
//! All cells are read as strings.
//!
//! License: MIT OR APACHE 2.0

use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use log::{debug, info, warn};
use std::io::Cursor;
use std::path::Path;

use crate::errors::{LoadWarning, PhonesanError};
use crate::table::RecordTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Xlsx,
}

impl InputFormat {
    /// Picks the format from a file name's extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Result<Self, PhonesanError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("xlsx") => Ok(InputFormat::Xlsx),
            _ => Err(PhonesanError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// A parsed input plus the warnings raised while loading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: RecordTable,
    pub warnings: Vec<LoadWarning>,
}

/// Reads a table from a file on disk.
pub fn read_table_from_path<P: AsRef<Path>>(path: P, placeholder: &str) -> Result<LoadedTable, PhonesanError> {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    // Reject the extension before touching the file.
    InputFormat::from_file_name(&name)?;
    let bytes = std::fs::read(path)?;
    read_table(&name, &bytes, placeholder)
}

/// Parses `bytes` according to the extension of `name`.
pub fn read_table(name: &str, bytes: &[u8], placeholder: &str) -> Result<LoadedTable, PhonesanError> {
    let format = InputFormat::from_file_name(name)?;
    let mut grid = match format {
        InputFormat::Csv => read_csv_grid(bytes)?,
        InputFormat::Xlsx => read_xlsx_grid(bytes)?,
    };

    if grid.is_empty() {
        return Err(PhonesanError::MalformedInput(format!("'{}' has no header row", name)));
    }
    let header = grid.remove(0);
    let (table, warning) = RecordTable::from_raw(header, grid, placeholder);

    let warnings: Vec<LoadWarning> = warning.into_iter().collect();
    for w in &warnings {
        warn!("{}", w);
    }
    info!(
        "Loaded '{}': {} columns, {} rows",
        name,
        table.columns().len(),
        table.len()
    );
    Ok(LoadedTable { table, warnings })
}

fn read_csv_grid(bytes: &[u8]) -> Result<Vec<Vec<String>>, PhonesanError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let delimiter = sniff_delimiter(bytes);
    debug!("Reading CSV with delimiter '{}'", delimiter as char);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| PhonesanError::MalformedInput(e.to_string()))?;
        grid.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect::<Vec<String>>(),
        );
    }
    Ok(grid)
}

/// Picks the field delimiter by looking at the header line only.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header_end = bytes.iter().position(|&b| b == b'\n').unwrap_or(bytes.len());
    let header = &bytes[..header_end];
    if header.contains(&b';') && !header.contains(&b',') {
        b';'
    } else {
        b','
    }
}

fn read_xlsx_grid(bytes: &[u8]) -> Result<Vec<Vec<String>>, PhonesanError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| PhonesanError::MalformedInput(format!("cannot open workbook: {}", e)))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PhonesanError::MalformedInput("workbook has no worksheets".to_string()))?;

    // The used range drops blank cells; the declared dimension keeps them.
    let declared_end = workbook
        .worksheet_cells_reader(&sheet)
        .map(|reader| reader.dimensions().end)
        .ok();
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| PhonesanError::MalformedInput(format!("cannot read worksheet '{}': {}", sheet, e)))?;

    let Some(used_end) = range.end() else {
        return Ok(Vec::new());
    };
    let (last_row, last_col) = match declared_end {
        Some((row, col)) => (row.max(used_end.0), col.max(used_end.1)),
        None => used_end,
    };

    Ok((0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| range.get_value((row, col)).map(cell_to_string).unwrap_or_default())
                .collect()
        })
        .collect())
}

/// Renders a workbook cell as text, writing whole floats without a fraction
/// so numeric phone cells keep their digits.
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
