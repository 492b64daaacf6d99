//! `phonesan check`: normalize and validate numbers without touching a file.

use anyhow::Result;
use std::io::Write;

use phonesan_core::{normalize_with, validate_with, SanitizerConfig, Validity};

use crate::ui::summary;

/// Classifies each raw number and prints a table of the results.
pub fn run_check<W: Write>(
    config: &SanitizerConfig,
    numbers: &[String],
    writer: &mut W,
    supports_color: bool,
) -> Result<Vec<(String, String, Validity)>> {
    let plan = &config.numbering;
    let checks: Vec<(String, String, Validity)> = numbers
        .iter()
        .map(|raw| (raw.clone(), normalize_with(raw, plan), validate_with(raw, plan)))
        .collect();

    summary::print_checks(writer, &checks, supports_color)?;
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_number() -> Result<()> {
        let numbers = vec!["+55 (11) 91234-5678".to_string(), "1234".to_string()];
        let mut out = Vec::new();
        let checks = run_check(&SanitizerConfig::default(), &numbers, &mut out, false)?;

        assert_eq!(checks[0].1, "11912345678");
        assert_eq!(checks[0].2, Validity::Valid);
        assert_eq!(checks[1].2, Validity::Invalid);
        Ok(())
    }
}
