// phonesan-core/src/lib.rs
//! # phonesan Core Library
//!
//! `phonesan-core` provides the platform-independent logic for cleansing
//! spreadsheets of phone-number records. It normalizes numbers, strips invalid
//! ones, removes numbers found on a blacklist, and produces a cleaned export
//! plus summary counts.
//!
//! The library holds no global state: caching is an explicit `SessionCache`
//! owned by the caller, and every run processes one table end to end.
//!
//! ## Modules
//!
//! * `config`: The numbering plan, phone-column prefixes and output settings, loaded from YAML.
//! * `normalizer`: Reduces raw text to a national digit string.
//! * `validators`: Classifies normalized numbers as valid or invalid.
//! * `blacklist`: Loads the exclusion list from HTTP or a file.
//! * `table`: The in-memory record table and header normalization.
//! * `input`: Parses `.csv` and `.xlsx` uploads.
//! * `export`: Writes the cleaned table as an `.xlsx` artifact.
//! * `pipeline`: Phone-column detection and the per-cell cleaning pass.
//! * `cache`: Memoization of parsed uploads and blacklists.
//! * `pii`: Keeps phone numbers out of debug logs.
//! * `headless`: One-shot convenience wrapper over the whole pipeline.
//!
//! ## Usage Example
//!
//! ```rust
//! use phonesan_core::{Blacklist, RecordTable, SanitizerConfig, Sanitizer};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SanitizerConfig::load_default()?;
//!     let blacklist = Blacklist::from_entries(["+55 21 98765-4321"], &config.numbering);
//!
//!     let mut table = RecordTable::new(
//!         vec!["name".into(), "telephone".into()],
//!         vec![
//!             vec!["Ana".into(), "+55 (11) 91234-5678".into()],
//!             vec!["Bia".into(), "(21) 98765-4321".into()],
//!         ],
//!     );
//!
//!     let report = Sanitizer::new(&config, &blacklist).run(&mut table, Vec::new())?;
//!     assert_eq!(table.cell(0, "telephone"), Some("11912345678"));
//!     assert_eq!(table.cell(1, "telephone"), Some(""));
//!     assert_eq!(report.stats.blacklisted, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Pipeline operations return [`PhonesanError`]. Configuration loading uses
//! `anyhow::Error` with context, since its failures are reported, not matched on.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod blacklist;
pub mod cache;
pub mod config;
pub mod errors;
pub mod export;
pub mod headless;
pub mod input;
pub mod normalizer;
pub mod pii;
pub mod pipeline;
pub mod table;
pub mod validators;

/// Re-exports the configuration types.
pub use config::{
    config_candidate_paths,
    BlacklistConfig,
    HeaderConfig,
    NumberingPlan,
    OutputConfig,
    PhoneColumnConfig,
    SanitizerConfig,
};

/// Re-exports the custom error type and non-fatal warnings.
pub use errors::{LoadWarning, PhonesanError};

pub use normalizer::{normalize, normalize_with};
pub use validators::{validate, validate_with, Validity};

pub use blacklist::{
    is_blacklisted,
    load_blacklist,
    parse_blacklist,
    Blacklist,
    BlacklistSource,
    FileSource,
    HttpSource,
};

pub use table::{normalize_headers, RecordTable};
pub use input::{read_table, read_table_from_path, InputFormat, LoadedTable};
pub use export::{export_artifact, write_workbook, Artifact, XLSX_MIME};

pub use pipeline::{detect_phone_columns, sanitize, Sanitizer, SanitizeReport, SanitizeStats};

pub use cache::SessionCache;

/// Re-exports the one-shot entry point.
pub use headless::{headless_sanitize_upload, HeadlessOutcome};
