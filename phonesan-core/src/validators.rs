// File: phonesan-core/src/validators.rs
//! Programmatic validation of normalized phone numbers.
//!
//! A number is accepted when its national length is within the numbering
//! plan's bounds and its subscriber part (the trailing `subscriber_len`
//! digits) starts with an allowed digit. The default plan accepts 10 or 11
//! digits whose subscriber part starts with 2-9.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;
use std::fmt;

use crate::config::NumberingPlan;
use crate::normalizer::{normalize_with, DEFAULT_PLAN};

/// Outcome of validating a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Validity::Valid => write!(f, "Valid"),
            Validity::Invalid => write!(f, "Invalid"),
        }
    }
}

/// Validates `raw` against the default numbering plan.
pub fn validate(raw: &str) -> Validity {
    validate_with(raw, &DEFAULT_PLAN)
}

/// Normalizes `raw` and checks it against `plan`.
pub fn validate_with(raw: &str, plan: &NumberingPlan) -> Validity {
    let number = normalize_with(raw, plan);
    classify_normalized(&number, plan)
}

/// Classifies an already-normalized number.
pub(crate) fn classify_normalized(number: &str, plan: &NumberingPlan) -> Validity {
    if number.len() < plan.national_min_len || number.len() > plan.national_max_len {
        return Validity::Invalid;
    }

    // Normalized numbers are ASCII digits, so byte slicing is safe.
    let subscriber = &number[number.len().saturating_sub(plan.subscriber_len)..];
    let Some(leading) = subscriber.chars().next() else {
        return Validity::Invalid;
    };

    if plan.subscriber_leading_digits.contains(leading) {
        Validity::Valid
    } else {
        Validity::Invalid
    }
}
