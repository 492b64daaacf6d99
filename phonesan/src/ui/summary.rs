//! Renders sanitization reports and number checks as terminal tables.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::fmt;
use std::io::{self, Write};

use phonesan_core::{SanitizeReport, Validity};

fn base_table(supports_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !supports_color {
        table.force_no_tty();
    }
    table
}

fn colored<T: fmt::Display>(text: T, color: Color, supports_color: bool) -> Cell {
    let cell = Cell::new(text);
    if supports_color {
        cell.fg(color)
    } else {
        cell
    }
}

/// Writes the counts and detected phone columns of one report.
pub fn print_report<W: Write>(
    writer: &mut W,
    source: &str,
    report: &SanitizeReport,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "Summary for {}", source)?;
    writeln!(writer, "Phone columns: {}", report.phone_columns.join(", "))?;

    let mut table = base_table(supports_color);
    table.set_header(vec!["Result", "Count"]);
    table.add_row(vec![
        colored("Valid after sanitization", Color::Green, supports_color),
        Cell::new(report.stats.valid),
    ]);
    table.add_row(vec![
        colored("Invalid after sanitization", Color::Red, supports_color),
        Cell::new(report.stats.invalid),
    ]);
    table.add_row(vec![
        colored("Removed by blacklist", Color::Yellow, supports_color),
        Cell::new(report.stats.blacklisted),
    ]);
    writeln!(writer, "{}", table)
}

/// Writes one row per checked number.
pub fn print_checks<W: Write>(
    writer: &mut W,
    checks: &[(String, String, Validity)],
    supports_color: bool,
) -> io::Result<()> {
    let mut table = base_table(supports_color);
    table.set_header(vec!["Input", "Normalized", "Result"]);
    for (raw, normalized, validity) in checks {
        let color = if validity.is_valid() { Color::Green } else { Color::Red };
        table.add_row(vec![
            Cell::new(raw),
            Cell::new(normalized),
            colored(validity, color, supports_color),
        ]);
    }
    writeln!(writer, "{}", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonesan_core::{Blacklist, RecordTable, Sanitizer, SanitizerConfig};

    fn sample_report() -> SanitizeReport {
        let config = SanitizerConfig::default();
        let blacklist = Blacklist::default();
        let mut table = RecordTable::new(vec!["tel".into()], vec![vec!["11912345678".into()], vec!["12".into()]]);
        Sanitizer::new(&config, &blacklist)
            .run(&mut table, Vec::new())
            .unwrap()
    }

    #[test]
    fn report_lists_counts_and_columns() {
        let mut buf = Vec::new();
        print_report(&mut buf, "mailing.csv", &sample_report(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Summary for mailing.csv"));
        assert!(text.contains("Phone columns: tel"));
        assert!(text.contains("Removed by blacklist"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn checks_show_normalized_form() {
        let mut buf = Vec::new();
        let checks = vec![("+55 11 91234-5678".to_string(), "11912345678".to_string(), Validity::Valid)];
        print_checks(&mut buf, &checks, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("11912345678"));
        assert!(text.contains("Valid"));
    }
}
