//! Terminal colorization for tree and report output
//!
//! Applies ANSI escape codes using crossterm. Only the tree connectors and
//! annotations are styled; class names keep the terminal color.

use crossterm::style::{Color, Stylize};

const NOTE_PREFIX: &str = " (inherits from: ";
const CYCLE_SUFFIX: &str = " (cycle)";

/// Colorize rendered tree output
///
/// - Connectors and indentation: Cyan
/// - `(inherits from: ...)` notes: Yellow
/// - `(cycle)` markers: Red
pub fn colorize_tree(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        let name_start = line
            .char_indices()
            .find(|(_, c)| !is_connector_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        let (connectors, rest) = line.split_at(name_start);

        if !connectors.is_empty() {
            result.push_str(&format!("{}", connectors.with(Color::Cyan)));
        }

        if let Some(name) = rest.strip_suffix(CYCLE_SUFFIX) {
            result.push_str(name);
            result.push_str(&format!("{}", CYCLE_SUFFIX.with(Color::Red)));
        } else if let Some(at) = rest.find(NOTE_PREFIX) {
            let (name, note) = rest.split_at(at);
            result.push_str(name);
            result.push_str(&format!("{}", note.with(Color::Yellow)));
        } else {
            result.push_str(rest);
        }
        result.push('\n');
    }

    // Remove trailing newline to match input format
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Characters that make up the tree prefix in either character set
fn is_connector_char(c: char) -> bool {
    matches!(c, '├' | '└' | '│' | '─' | '|' | '`' | '-' | ' ')
}

/// Section heading for warnings
pub fn colorize_heading(line: &str) -> String {
    format!("{}", line.with(Color::Yellow).bold())
}

/// A single warning line
pub fn colorize_warning(line: &str) -> String {
    format!("{}", line.with(Color::Yellow))
}

/// The all-clear line
pub fn colorize_success(line: &str) -> String {
    format!("{}", line.with(Color::Green))
}
