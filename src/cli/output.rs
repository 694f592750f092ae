use colored::Colorize;
use std::fmt;

/// Message categories used by the shell output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Plain,
    Section,
    Success,
    Warning,
    Error,
}

/// Styles a message for terminal display. Colour is dropped automatically when
/// the terminal does not support it or `NO_COLOR` is set.
pub fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Plain => text,
        MessageKind::Section => text.bold().to_string(),
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => text.bright_yellow().to_string(),
        MessageKind::Error => text.bright_red().to_string(),
    }
}

/// Formats a computed total the way the menu prints money: `$` followed by the number.
pub fn money(value: f64) -> String {
    format!("${value}")
}
