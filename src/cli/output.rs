//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::application::render::{CheckState, RowParts};
use crate::config::Markers;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print one tree row; the check marker is colored by state.
pub fn row(parts: &RowParts, markers: &Markers, color: bool) {
    if !color {
        println!("{}", parts.to_plain(markers));
        return;
    }

    let marker = parts.state.marker(markers);
    let marker = match parts.state {
        CheckState::Checked => marker.green().bold(),
        CheckState::Indeterminate => marker.yellow(),
        CheckState::Unchecked => marker.normal(),
    };
    let key = parts
        .key
        .as_ref()
        .map(|k| format!("  #{}", k).dimmed().to_string())
        .unwrap_or_default();

    println!(
        "{}{} {} {}{}",
        parts.indent,
        parts.toggle.cyan(),
        marker,
        parts.label,
        key
    );
}
