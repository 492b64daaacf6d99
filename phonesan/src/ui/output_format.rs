//! Status message formatting for stderr.
//!
//! Messages are colored only when the destination supports it; callers pass
//! that decision in so tests can write to plain buffers.

use owo_colors::OwoColorize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warn,
    Error,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Success => "done",
            MessageKind::Warn => "warning",
            MessageKind::Error => "error",
        }
    }
}

pub fn print_message<W: Write>(writer: &mut W, kind: MessageKind, msg: &str, supports_color: bool) -> io::Result<()> {
    let label = kind.label();
    if supports_color {
        let styled = match kind {
            MessageKind::Info => label.cyan().to_string(),
            MessageKind::Success => label.green().bold().to_string(),
            MessageKind::Warn => label.yellow().bold().to_string(),
            MessageKind::Error => label.red().bold().to_string(),
        };
        writeln!(writer, "{}: {}", styled, msg)
    } else {
        writeln!(writer, "{}: {}", label, msg)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, MessageKind::Info, msg, supports_color)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, MessageKind::Success, msg, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, MessageKind::Warn, msg, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, MessageKind::Error, msg, supports_color)
}
