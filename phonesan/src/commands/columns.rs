//! `phonesan columns`: show which columns the sanitizer would treat as phones.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use phonesan_core::{detect_phone_columns, read_table_from_path, SanitizerConfig};

use crate::commands::warn_msg;

/// Lists every column of `input`, marking phone-bearing ones with `*`.
///
/// Returns the detected phone columns. A file without any is not an error
/// here; the listing is how users find out why `sanitize` would refuse it.
pub fn run_columns<W: Write>(
    config: &SanitizerConfig,
    input: &Path,
    writer: &mut W,
    quiet: bool,
) -> Result<Vec<String>> {
    let loaded = read_table_from_path(input, &config.headers.placeholder)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    if !quiet {
        for warning in &loaded.warnings {
            warn_msg(warning.to_string());
        }
    }

    let phone_columns = detect_phone_columns(&loaded.table, &config.phone_columns.prefixes);
    for column in loaded.table.columns() {
        let marker = if phone_columns.contains(column) { "*" } else { " " };
        writeln!(writer, "{} {}", marker, column)?;
    }

    if phone_columns.is_empty() {
        writeln!(
            writer,
            "No phone column found (recognized prefixes: {})",
            config.phone_columns.prefixes.join(", ")
        )?;
    } else {
        writeln!(writer, "{} phone column(s), {} row(s)", phone_columns.len(), loaded.table.len())?;
    }
    Ok(phone_columns)
}
