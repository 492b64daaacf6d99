//! phonesan entry point.
//!
//! Parses the command line, sets up logging and dispatches to the commands.

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use phonesan::cli::{Cli, Commands};
use phonesan::commands::{self, check, columns, sanitize};
use phonesan::logger;
use phonesan_core::SessionCache;

fn main() -> ExitCode {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logger::init_logger(logger::level_for_flags(cli.quiet, cli.debug));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::error_msg(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sanitize(cmd) => {
            let config = commands::load_config(&cmd.config)?;
            let opts = sanitize::SanitizeOptions {
                blacklist: sanitize::BlacklistChoice::resolve(cmd.blacklist_file, cmd.blacklist_url, &config),
                inputs: cmd.inputs,
                output: cmd.output,
                output_dir: cmd.output_dir,
                json: cmd.json,
                no_summary: cmd.no_summary,
                quiet: cli.quiet,
            };
            let mut cache = SessionCache::new();
            sanitize::run_sanitize_opts(&config, opts, &mut cache)?;
        }
        Commands::Columns(cmd) => {
            let config = commands::load_config(&cmd.config)?;
            columns::run_columns(&config, &cmd.input, &mut io::stdout().lock(), cli.quiet)?;
        }
        Commands::Check(cmd) => {
            let config = commands::load_config(&cmd.config)?;
            let supports_color = io::stdout().is_terminal();
            check::run_check(&config, &cmd.numbers, &mut io::stdout().lock(), supports_color)?;
        }
    }
    Ok(())
}
