// phonesan-core/src/export.rs
//! Writing the cleaned table to an `.xlsx` artifact.

use log::debug;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use crate::config::OutputConfig;
use crate::errors::PhonesanError;
use crate::table::RecordTable;

/// MIME type of an Office Open XML workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A finished export, ready to be written or served for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), PhonesanError> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Serializes `table` as a single-sheet workbook with a header row.
///
/// Empty cells are stored as text-formatted blanks, so the sheet dimension
/// covers every row even when trailing rows were cleared entirely.
pub fn write_workbook(table: &RecordTable, sheet_name: &str) -> Result<Vec<u8>, PhonesanError> {
    let blank = Format::new().set_num_format("@");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string(0, column_number(col)?, name)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_number = u32::try_from(row_idx + 1)
            .map_err(|_| PhonesanError::Export(format!("row {} exceeds the sheet size", row_idx + 1)))?;
        for (col, value) in row.iter().enumerate() {
            let col = column_number(col)?;
            if value.is_empty() {
                worksheet.write_blank(row_number, col, &blank)?;
            } else {
                worksheet.write_string(row_number, col, value)?;
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!("Workbook serialized: {} bytes", bytes.len());
    Ok(bytes)
}

/// Builds the downloadable artifact described by `output`.
pub fn export_artifact(table: &RecordTable, output: &OutputConfig) -> Result<Artifact, PhonesanError> {
    Ok(Artifact {
        file_name: output.file_name.clone(),
        mime: XLSX_MIME,
        bytes: write_workbook(table, &output.sheet_name)?,
    })
}

fn column_number(col: usize) -> Result<u16, PhonesanError> {
    u16::try_from(col).map_err(|_| PhonesanError::Export(format!("column {} exceeds the sheet size", col)))
}
