// phonesan/src/lib.rs
//! # phonesan CLI Application
//!
//! This crate provides the command-line front end for `phonesan-core`: it
//! reads mailing files, runs the sanitization pipeline, prints the summary
//! and writes the cleaned workbook.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::sanitize::{run_sanitize_opts, SanitizeOptions};
