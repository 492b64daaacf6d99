// phonesan-core/src/pii.rs
//! Keeps phone numbers out of debug logs unless explicitly allowed.

use lazy_static::lazy_static;
use log::debug;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PHONESAN_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Masks a number, keeping only its last two digits visible.
pub fn redact_number(number: &str) -> String {
    const VISIBLE: usize = 2;
    let len = number.chars().count();
    if len <= VISIBLE {
        return "[REDACTED]".to_string();
    }
    let tail: String = number.chars().skip(len - VISIBLE).collect();
    format!("{}{}", "*".repeat(len - VISIBLE), tail)
}

pub fn loggable(number: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        number.to_string()
    } else {
        redact_number(number)
    }
}

pub fn log_cell_removed(column: &str, row: usize, number: &str, reason: &str) {
    debug!(
        "Cleared column '{}' row {}: '{}' ({})",
        column,
        row,
        loggable(number),
        reason
    );
}
