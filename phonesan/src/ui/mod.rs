//! Terminal output helpers: colored status messages and the summary table.

pub mod output_format;
pub mod summary;
