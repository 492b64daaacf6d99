// phonesan-core/src/pipeline.rs
//! The sanitization pipeline: phone-column detection and per-cell cleaning.
//!
//! For every phone-bearing column, each cell is normalized, cleared when it is
//! blacklisted or invalid, and then tallied. The table is mutated in place.
//! Column names are checked before any cell is touched, so a failing run
//! leaves the table as it was.
//!
//! License: MIT OR APACHE 2.0

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

use crate::blacklist::Blacklist;
use crate::config::{NumberingPlan, SanitizerConfig};
use crate::errors::{LoadWarning, PhonesanError};
use crate::normalizer::normalize_with;
use crate::pii;
use crate::table::RecordTable;
use crate::validators::{classify_normalized, Validity};

/// Aggregate counts over every phone-bearing cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeStats {
    /// Cells left holding a valid number.
    pub valid: usize,
    /// Cells left empty, including blacklisted and originally blank ones.
    pub invalid: usize,
    /// Cells cleared because their number is blacklisted.
    pub blacklisted: usize,
}

impl SanitizeStats {
    fn merge(&mut self, other: SanitizeStats) {
        self.valid += other.valid;
        self.invalid += other.invalid;
        self.blacklisted += other.blacklisted;
    }
}

/// What a user sees before downloading the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub phone_columns: Vec<String>,
    pub stats: SanitizeStats,
    pub warnings: Vec<LoadWarning>,
    pub generated_at: DateTime<Utc>,
}

impl SanitizeReport {
    /// Pretty JSON rendering, as shown to API clients.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Names of the columns whose lowercased name starts with one of `prefixes`.
///
/// Prefixes are compared lowercased as well.
pub fn detect_phone_columns(table: &RecordTable, prefixes: &[String]) -> Vec<String> {
    let prefixes: Vec<String> = prefixes.iter().map(|p| p.to_lowercase()).collect();
    table
        .columns()
        .iter()
        .filter(|name| {
            let lower = name.to_lowercase();
            prefixes.iter().any(|p| !p.is_empty() && lower.starts_with(p.as_str()))
        })
        .cloned()
        .collect()
}

/// Cleans `phone_columns` of `table` in place and returns the counts.
///
/// Fails with `NoPhoneColumnFound` when `phone_columns` is empty and with
/// `UnknownColumn` when a name is not in the table; in both cases the table
/// is untouched.
pub fn sanitize(
    table: &mut RecordTable,
    phone_columns: &[String],
    blacklist: &Blacklist,
    plan: &NumberingPlan,
) -> Result<SanitizeStats, PhonesanError> {
    if phone_columns.is_empty() {
        return Err(PhonesanError::NoPhoneColumnFound(Vec::new()));
    }

    let indices = phone_columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .map(|idx| (name.as_str(), idx))
                .ok_or_else(|| PhonesanError::UnknownColumn(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut stats = SanitizeStats::default();
    for (name, idx) in indices {
        let column_stats = sanitize_column(table, name, idx, blacklist, plan);
        debug!(
            "Column '{}': {} valid, {} invalid, {} blacklisted",
            name, column_stats.valid, column_stats.invalid, column_stats.blacklisted
        );
        stats.merge(column_stats);
    }

    info!(
        "Sanitized {} column(s): {} valid, {} invalid, {} blacklisted",
        phone_columns.len(),
        stats.valid,
        stats.invalid,
        stats.blacklisted
    );
    Ok(stats)
}

fn sanitize_column(
    table: &mut RecordTable,
    name: &str,
    idx: usize,
    blacklist: &Blacklist,
    plan: &NumberingPlan,
) -> SanitizeStats {
    let mut stats = SanitizeStats::default();

    for (row, cell) in table.column_cells_mut(idx).enumerate() {
        let number = normalize_with(cell, plan);

        *cell = if blacklist.contains(&number) {
            pii::log_cell_removed(name, row, &number, "blacklisted");
            stats.blacklisted += 1;
            String::new()
        } else if classify_normalized(&number, plan) == Validity::Invalid {
            if !number.is_empty() {
                pii::log_cell_removed(name, row, &number, "invalid");
            }
            String::new()
        } else {
            number
        };

        // Tally what the cell holds now, not what it held before.
        match classify_normalized(cell, plan) {
            Validity::Valid => stats.valid += 1,
            Validity::Invalid => stats.invalid += 1,
        }
    }

    stats
}

/// Holds a configuration and a loaded blacklist and runs the whole pipeline
/// over tables: detection, then cleaning.
#[derive(Debug, Clone)]
pub struct Sanitizer<'a> {
    config: &'a SanitizerConfig,
    blacklist: &'a Blacklist,
}

impl<'a> Sanitizer<'a> {
    pub fn new(config: &'a SanitizerConfig, blacklist: &'a Blacklist) -> Self {
        Self { config, blacklist }
    }

    /// Detects phone columns in `table` and cleans them in place.
    pub fn run(&self, table: &mut RecordTable, warnings: Vec<LoadWarning>) -> Result<SanitizeReport, PhonesanError> {
        let prefixes = &self.config.phone_columns.prefixes;
        let phone_columns = detect_phone_columns(table, prefixes);
        if phone_columns.is_empty() {
            return Err(PhonesanError::NoPhoneColumnFound(prefixes.clone()));
        }

        let stats = sanitize(table, &phone_columns, self.blacklist, &self.config.numbering)?;
        Ok(SanitizeReport {
            phone_columns,
            stats,
            warnings,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> RecordTable {
        RecordTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn detection_is_case_insensitive_prefix_match() {
        let t = table(&["Nome", "TELEFONE", "Destino 2", "hotel", "tel"], &[]);
        let prefixes = vec!["tel".to_string(), "DES".to_string()];
        assert_eq!(detect_phone_columns(&t, &prefixes), vec!["TELEFONE", "Destino 2", "tel"]);
    }

    #[test]
    fn cells_are_normalized_cleared_and_counted() {
        let plan = NumberingPlan::default();
        let blacklist = Blacklist::from_entries(["21987654321"], &plan);
        let mut t = table(
            &["nome", "tel"],
            &[
                &["Ana", "+55 (11) 91234-5678"],
                &["Bia", "(21) 98765-4321"],
                &["Caio", "1234"],
                &["Duda", ""],
            ],
        );

        let stats = sanitize(&mut t, &["tel".to_string()], &blacklist, &plan).unwrap();

        assert_eq!(t.cell(0, "tel"), Some("11912345678"));
        assert_eq!(t.cell(1, "tel"), Some(""));
        assert_eq!(t.cell(2, "tel"), Some(""));
        assert_eq!(t.cell(3, "tel"), Some(""));
        assert_eq!(t.cell(0, "nome"), Some("Ana"));
        assert_eq!(stats, SanitizeStats { valid: 1, invalid: 3, blacklisted: 1 });
    }

    #[test]
    fn empty_column_list_leaves_table_untouched() {
        let plan = NumberingPlan::default();
        let mut t = table(&["nome"], &[&["Ana"]]);
        let before = t.clone();
        let err = sanitize(&mut t, &[], &Blacklist::default(), &plan).unwrap_err();
        assert!(matches!(err, PhonesanError::NoPhoneColumnFound(_)));
        assert_eq!(t, before);
    }

    #[test]
    fn unknown_column_is_rejected_before_any_change() {
        let plan = NumberingPlan::default();
        let mut t = table(&["tel"], &[&["(11) 91234-5678"]]);
        let before = t.clone();
        let columns = vec!["tel".to_string(), "fax".to_string()];
        let err = sanitize(&mut t, &columns, &Blacklist::default(), &plan).unwrap_err();
        assert!(matches!(err, PhonesanError::UnknownColumn(ref c) if c == "fax"));
        assert_eq!(t, before);
    }

    #[test]
    fn sanitizer_reports_detected_columns() {
        let config = SanitizerConfig::default();
        let blacklist = Blacklist::default();
        let mut t = table(&["telefone", "destino"], &[&["11912345678", "1101234567"]]);

        let report = Sanitizer::new(&config, &blacklist).run(&mut t, Vec::new()).unwrap();

        assert_eq!(report.phone_columns, vec!["telefone", "destino"]);
        assert_eq!(report.stats, SanitizeStats { valid: 1, invalid: 1, blacklisted: 0 });
    }

    #[test]
    fn sanitizer_without_phone_columns_names_the_prefixes() {
        let config = SanitizerConfig::default();
        let blacklist = Blacklist::default();
        let mut t = table(&["nome"], &[&["Ana"]]);
        let err = Sanitizer::new(&config, &blacklist).run(&mut t, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("tel, des"));
    }

    #[test]
    fn report_serializes_counts_and_warnings() {
        let config = SanitizerConfig::default();
        let blacklist = Blacklist::default();
        let mut t = table(&["tel"], &[&["11912345678"]]);
        let warnings = vec![LoadWarning::EmptyHeaderRenamed { renamed: vec!["empty1".into()] }];
        let report = Sanitizer::new(&config, &blacklist).run(&mut t, warnings).unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["stats"]["valid"], 1);
        assert_eq!(json["phone_columns"][0], "tel");
        assert!(json["generated_at"].is_string());
    }
}
