//! Whitespace and blank-line canonicalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Horizontal whitespace directly before a line break
static TRAILING_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+\n").expect("valid trailing whitespace pattern"));

/// Three or more line breaks in a row
static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank run pattern"));

/// Canonicalize a Markdown fragment.
///
/// Strips horizontal whitespace before every newline, collapses runs of three
/// or more newlines to exactly two, then trims the whole string. Idempotent.
pub fn normalize(text: &str) -> String {
    let stripped = TRAILING_WS.replace_all(text, "\n");
    let collapsed = BLANK_RUN.replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}

/// Lines of `text` with leading and trailing blank lines dropped and every
/// interior run of blank lines reduced to a single empty line.
pub fn squeeze_blank_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = Vec::new();
    let mut pending_blank = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            pending_blank = !lines.is_empty();
            continue;
        }
        if pending_blank {
            lines.push("");
            pending_blank = false;
        }
        lines.push(line);
    }

    lines
}
