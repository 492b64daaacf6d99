// phonesan/src/logger.rs
//! Logging setup for the phonesan binary.
//!
//! Without an explicit level the filter comes from `RUST_LOG`, defaulting to
//! `warn` so that only problems reach stderr.

use log::LevelFilter;

/// Initializes `env_logger`. Safe to call more than once; later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).try_init().ok();
}

/// Maps the global `--quiet` / `--debug` flags to a level override.
pub fn level_for_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(level_for_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_for_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_for_flags(false, false), None);
    }
}
