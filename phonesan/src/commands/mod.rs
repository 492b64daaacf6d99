//! Command implementations for the phonesan CLI.

pub mod check;
pub mod columns;
pub mod sanitize;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io;

use phonesan_core::SanitizerConfig;

use crate::cli::ConfigArgs;
use crate::ui::output_format;

/// Resolves the configuration: explicit file, then discovery, then CLI prefix overrides.
pub fn load_config(args: &ConfigArgs) -> Result<SanitizerConfig> {
    let mut config = match &args.config {
        Some(path) => SanitizerConfig::load_from_file(path)?,
        None => SanitizerConfig::discover()?,
    };
    config
        .set_prefixes(&args.prefixes)
        .context("Invalid --prefix value")?;
    debug!("Effective phone-column prefixes: {:?}", config.phone_columns.prefixes);
    Ok(config)
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), supports_color);
}
