// File: phonesan-core/src/normalizer.rs
//! Reduces raw phone-number text to its national digit form.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;

use crate::config::NumberingPlan;

pub(crate) static DEFAULT_PLAN: Lazy<NumberingPlan> = Lazy::new(NumberingPlan::default);

/// Normalizes `raw` with the default numbering plan.
///
/// ```
/// use phonesan_core::normalize;
/// assert_eq!(normalize("+55 (11) 91234-5678"), "11912345678");
/// ```
pub fn normalize(raw: &str) -> String {
    normalize_with(raw, &DEFAULT_PLAN)
}

/// Keeps only ASCII digits, then drops the country code while the number is
/// still longer than the national maximum.
///
/// Never fails; the result may be empty.
pub fn normalize_with(raw: &str, plan: &NumberingPlan) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut national = digits.as_str();
    // Stripping to a fixed point keeps normalize idempotent.
    while !plan.country_code.is_empty()
        && national.starts_with(plan.country_code.as_str())
        && national.len() > plan.national_max_len
    {
        national = &national[plan.country_code.len()..];
    }

    national.trim().to_string()
}
