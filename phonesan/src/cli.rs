//! This file defines the command-line interface (CLI) for the phonesan application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "phonesan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Cleanse spreadsheets of phone numbers",
    long_about = "phonesan normalizes the phone numbers in a CSV or XLSX mailing list, clears numbers that are malformed or present on a blacklist, and writes the cleaned table to an XLSX workbook together with a summary of valid, invalid and blacklisted entries.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `phonesan` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes one or more mailing files and writes cleaned workbooks.
    #[command(about = "Sanitizes one or more mailing files and writes cleaned workbooks.")]
    Sanitize(SanitizeCommand),

    /// Lists the columns of a mailing file and marks the phone-bearing ones.
    #[command(about = "Lists the columns of a mailing file and marks the phone-bearing ones.")]
    Columns(ColumnsCommand),

    /// Normalizes and validates numbers given on the command line.
    #[command(about = "Normalizes and validates numbers given on the command line.")]
    Check(CheckCommand),
}

/// Options shared by every command that reads configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "PHONESAN_CONFIG", help = "Path to a configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Phone-column name prefixes, replacing the configured ones.
    #[arg(long = "prefix", short = 'p', value_name = "PREFIX", value_delimiter = ',', help = "Column name prefixes that mark phone columns (comma-separated or repeated).")]
    pub prefixes: Vec<String>,
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Input files (.csv or .xlsx).
    #[arg(value_name = "INPUT", required = true, help = "Mailing files to sanitize (.csv or .xlsx).")]
    pub inputs: Vec<PathBuf>,

    /// Write the workbook to this file. Only valid with a single input.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the cleaned workbook to this file (single input only).")]
    pub output: Option<PathBuf>,

    /// Directory for generated workbooks when `--output` is not given.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".", help = "Directory for generated workbooks.")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Fetch the blacklist from this URL instead of the configured one.
    #[arg(long = "blacklist-url", value_name = "URL", env = "PHONESAN_BLACKLIST_URL", help = "Fetch the blacklist from this URL.")]
    pub blacklist_url: Option<String>,

    /// Read the blacklist from a local file. Takes precedence over any URL.
    #[arg(long = "blacklist-file", value_name = "FILE", help = "Read the blacklist from a local file instead of fetching it.")]
    pub blacklist_file: Option<PathBuf>,

    /// Print the reports as JSON on stdout.
    #[arg(long = "json", help = "Print the sanitization reports as JSON on stdout.")]
    pub json: bool,

    /// Suppress the summary table.
    #[arg(long = "no-summary", help = "Suppress the summary table.")]
    pub no_summary: bool,
}

/// Arguments for the `columns` command.
#[derive(Parser, Debug)]
pub struct ColumnsCommand {
    /// Input file (.csv or .xlsx).
    #[arg(value_name = "INPUT", help = "Mailing file to inspect (.csv or .xlsx).")]
    pub input: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Raw phone numbers.
    #[arg(value_name = "NUMBER", required = true, help = "Phone numbers to normalize and validate.")]
    pub numbers: Vec<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn prefixes_accept_commas_and_repeats() {
        let cli = Cli::parse_from(["phonesan", "check", "-p", "tel,cel", "-p", "fone", "119"]);
        let Commands::Check(check) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(check.config.prefixes, vec!["tel", "cel", "fone"]);
    }

    #[test]
    fn sanitize_requires_an_input() {
        assert!(Cli::try_parse_from(["phonesan", "sanitize"]).is_err());
    }
}
