// phonesan-core/src/table.rs
//! The in-memory record table and its header normalization.
//!
//! A [`RecordTable`] is an ordered list of uniquely named columns plus rows of
//! string cells, every row padded to the column count. Column names are never
//! empty: blank or placeholder headers are renamed by [`normalize_headers`].
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::collections::HashSet;

use crate::errors::LoadWarning;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// Builds a table from already-normalized headers.
    ///
    /// Short rows are padded with empty cells; cells beyond the last column are dropped.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Builds a table from a raw header row, renaming blank or placeholder
    /// headers and widening the header for rows longer than it.
    pub fn from_raw(
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        placeholder: &str,
    ) -> (Self, Option<LoadWarning>) {
        let width = rows.iter().map(Vec::len).fold(header.len(), usize::max);
        let mut header = header;
        header.resize(width, String::new());

        let (columns, renamed) = normalize_headers(header, placeholder);
        let warning = if renamed.is_empty() {
            None
        } else {
            Some(LoadWarning::EmptyHeaderRenamed { renamed })
        };
        (Self::new(columns, rows), warning)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// One row as `(column, value)` pairs in column order.
    pub fn record(&self, row: usize) -> Option<Vec<(&str, &str)>> {
        let cells = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(cells.iter().map(String::as_str))
                .collect(),
        )
    }

    /// Mutable access to every cell of column `idx`, top to bottom.
    pub(crate) fn column_cells_mut(&mut self, idx: usize) -> impl Iterator<Item = &mut String> {
        self.rows.iter_mut().map(move |row| &mut row[idx])
    }
}

/// Renames blank and placeholder headers to `<placeholder>1`, `<placeholder>2`, ...
/// in encounter order, then suffixes remaining duplicates with `.1`, `.2`, ...
///
/// Returns the final names and the generated ones.
pub fn normalize_headers(raw: Vec<String>, placeholder: &str) -> (Vec<String>, Vec<String>) {
    let mut renamed = Vec::new();
    let mut next_label = 1usize;

    let named: Vec<String> = raw
        .into_iter()
        .map(|name| {
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(placeholder) {
                let label = format!("{}{}", placeholder, next_label);
                next_label += 1;
                renamed.push(label.clone());
                label
            } else {
                name
            }
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(named.len());
    for name in named {
        let mut candidate = name.clone();
        let mut suffix = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        if candidate != name {
            debug!("Duplicate column '{}' renamed to '{}'", name, candidate);
        }
        seen.insert(candidate.clone());
        columns.push(candidate);
    }

    (columns, renamed)
}
