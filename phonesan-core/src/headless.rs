// File: phonesan-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for running the whole pipeline without a user interface.
//! Provides a one-shot function that takes an upload and returns the cleaned
//! table, the report and the export artifact.

use log::info;

use crate::blacklist::BlacklistSource;
use crate::cache::SessionCache;
use crate::config::SanitizerConfig;
use crate::errors::PhonesanError;
use crate::export::{export_artifact, Artifact};
use crate::pipeline::{detect_phone_columns, Sanitizer, SanitizeReport};
use crate::table::RecordTable;

/// Everything a finished run produces.
#[derive(Debug, Clone)]
pub struct HeadlessOutcome {
    pub table: RecordTable,
    pub report: SanitizeReport,
    pub artifact: Artifact,
}

/// Loads an upload, sanitizes it and exports it, all or nothing.
///
/// Phone columns are detected before the blacklist is fetched, so an upload
/// without phone columns never costs a network round trip.
///
/// # Arguments
///
/// * `name` - The upload's file name; its extension picks the parser.
/// * `bytes` - The upload's content.
/// * `config` - The merged configuration.
/// * `source` - Where to fetch the blacklist from.
/// * `cache` - Session cache for parsed uploads and blacklists.
pub fn headless_sanitize_upload(
    name: &str,
    bytes: &[u8],
    config: &SanitizerConfig,
    source: &dyn BlacklistSource,
    cache: &mut SessionCache,
) -> Result<HeadlessOutcome, PhonesanError> {
    let loaded = cache.table(name, bytes, &config.headers.placeholder)?;
    let mut table = loaded.table;

    if detect_phone_columns(&table, &config.phone_columns.prefixes).is_empty() {
        return Err(PhonesanError::NoPhoneColumnFound(config.phone_columns.prefixes.clone()));
    }

    let blacklist = cache.blacklist(source, &config.numbering)?;
    let report = Sanitizer::new(config, &blacklist).run(&mut table, loaded.warnings)?;
    let artifact = export_artifact(&table, &config.output)?;

    info!("Headless run of '{}' produced {}", name, artifact.file_name);
    Ok(HeadlessOutcome { table, report, artifact })
}
