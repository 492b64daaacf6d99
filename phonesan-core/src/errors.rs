//! errors.rs - Custom error types for the phonesan-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically,
//! plus the non-fatal warnings raised while loading an input table.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// This enum represents all possible error types in the `phonesan-core` library.
///
/// Every variant aborts the run it was raised in: nothing is retried and no
/// partial output is produced.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PhonesanError {
    #[error("Unsupported input format for '{0}': expected a .csv or .xlsx file")]
    UnsupportedFormat(String),

    #[error("Blacklist unavailable: {0}")]
    BlacklistUnavailable(String),

    #[error("No phone column found (recognized prefixes: {})", .0.join(", "))]
    NoPhoneColumnFound(Vec<String>),

    #[error("Column '{0}' does not exist in the table")]
    UnknownColumn(String),

    #[error("Malformed input table: {0}")]
    MalformedInput(String),

    #[error("Failed to build the output workbook: {0}")]
    Export(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<rust_xlsxwriter::XlsxError> for PhonesanError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        PhonesanError::Export(err.to_string())
    }
}

/// Non-fatal conditions surfaced to the user while processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// Blank or placeholder header cells were given generated names.
    EmptyHeaderRenamed { renamed: Vec<String> },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadWarning::EmptyHeaderRenamed { renamed } => write!(
                f,
                "Empty columns were renamed to {}.",
                renamed.join(", ")
            ),
        }
    }
}
